use validator::Validate;

pub fn validate<T: Validate>(val: &T) -> crate::error::Result<()> {
    val.validate()?;
    Ok(())
}
