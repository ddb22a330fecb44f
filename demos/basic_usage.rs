// ============================================================================
// Basic Usage Example
// ============================================================================

use decimal_engine::prelude::*;

fn main() -> Result<(), NumericError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Decimal Engine Example ===\n");

    let ctx = ContextBuilder::new()
        .decimal_places(20)
        .rounding_mode(RoundingMode::HalfEven)
        .build()?;

    // Exact arithmetic
    let a = ctx.parse("0.1")?;
    let b = ctx.parse("0.2")?;
    println!("0.1 + 0.2 = {}", ctx.add(&a, &b));
    println!("0.1 * 0.2 = {}", ctx.mul(&a, &b));

    // Rounded arithmetic
    let one = BigNumber::from(1);
    let three = BigNumber::from(3);
    println!("1 / 3     = {}", ctx.div(&one, &three)?);
    println!("sqrt(2)   = {}", ctx.sqrt(&BigNumber::from(2)));
    println!("2 ^ 100   = {}", ctx.pow(&BigNumber::from(2), 100)?);

    // Bases
    let hex = ctx.parse_radix("ff.8", 16)?;
    println!("\nff.8 (base 16) = {}", hex);
    println!("in base 2       = {}", ctx.to_string_radix(&hex, 2)?);

    // Formatting
    let price = ctx.parse("-1234567.891")?;
    println!("\n=== Formatting {} ===", price);
    println!("to_fixed(2)       = {}", ctx.to_fixed(&price, Some(2), None)?);
    println!("to_exponential(3) = {}", ctx.to_exponential(&price, Some(3), None)?);
    println!("to_precision(4)   = {}", ctx.to_precision(&price, Some(4), None)?);
    println!("to_format(2)      = {}", ctx.to_format(&price, Some(2), None)?);

    let pi = ctx.parse("3.14159265358979")?;
    let (n, d) = ctx.to_fraction(&pi, Some(&BigNumber::from(1000)))?;
    println!("\npi ~ {} / {}", n, d);

    // Reconfiguration is atomic and visible to every subsequent call
    ctx.update(|c| c.with_modulo_mode(RoundingMode::Euclid))?;
    let r = ctx.modulo(&BigNumber::from(-7), &three)?;
    println!("\n-7 mod 3 (Euclid) = {}", r);

    println!("random(10) = {}", ctx.random(Some(10))?);

    let lenient = ctx.another(|c| c.with_error_policy(ErrorPolicy::Permissive))?;
    println!("\nlenient parse of \"abc\" = {}", lenient.parse("abc")?);

    Ok(())
}
