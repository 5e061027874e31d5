use serde::{Deserialize, Deserializer, de::Error};

/// Decode an integer written as a JSON number (integral floats included) or
/// as a numeric string. Comparisons downstream are always numeric.
pub(crate) fn lenient_integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Integer(u64),
        Float(f64),
        Text(String),
    }

    let value = match Repr::deserialize(deserializer)? {
        Repr::Integer(value) => Some(value),
        Repr::Float(value) => integral(value),
        Repr::Text(ref text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        }
    }
    .ok_or_else(|| D::Error::custom("not a non-negative integer"))?;

    T::try_from(value).map_err(|_| D::Error::custom(format!("integer out of range: {value}")))
}

/// A float that holds an exact non-negative integer, e.g. `100.0`.
pub(crate) fn integral(value: f64) -> Option<u64> {
    // 2^64 is the first float past u64::MAX.
    let in_range = value.is_finite() && value >= 0.0 && value < 18_446_744_073_709_551_616.0;
    (in_range && value.fract() == 0.0).then_some(value as u64)
}
