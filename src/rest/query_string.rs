use std::fmt;

/// Ordered `key=value` parameters for GET endpoints.
///
/// Values are written with their `Display` form and are not percent-encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryString {
    params: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Same as [`QueryString::with`], skipping `None`.
    pub fn with_opt<T: fmt::Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Appends the parameters to `path`; an empty query leaves it untouched.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            return path.to_string();
        }

        format!("{}?{}", path, self)
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
        }

        Ok(())
    }
}
