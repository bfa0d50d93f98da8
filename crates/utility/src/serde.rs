/// Deserializes a list from either a list, a single element, `null` or a
/// blank string.
///
/// Government open data APIs tend to collapse single element lists into the
/// element itself and to send `""` when there is nothing to return.
///
/// ```ignore
/// #[serde(default, deserialize_with = "utility::serde::one_or_many::deserialize")]
/// item: Vec<Item>,
/// ```
pub mod one_or_many {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
        Blank(String),
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        match Option::<OneOrMany<T>>::deserialize(deserializer)? {
            None => Ok(Vec::new()),
            Some(OneOrMany::Many(values)) => Ok(values),
            Some(OneOrMany::One(value)) => Ok(vec![value]),
            Some(OneOrMany::Blank(text)) if text.trim().is_empty() => Ok(Vec::new()),
            Some(OneOrMany::Blank(text)) => Err(D::Error::custom(format!(
                "expected a list or a single element, got string {text:?}"
            ))),
        }
    }
}

/// Deserializes an optional count that may be sent as a number or as a
/// numeric string.
pub mod lenient_count {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Count>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Count::Number(count)) => Ok(Some(count)),
            Some(Count::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(Count::Text(text)) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}
