use std::fmt;

/// Value under validation. Length checks apply to text, bound checks to numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

/// A value paired with the checks it has to pass
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: Value,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validatable {
    fn new(value: Value) -> Self {
        Self {
            value,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Value::Text(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::new(Value::Number(value))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// Checks a value against every rule it carries.
///
/// Rules are combined with AND. A rule that does not fit the value type
/// (a length on a number, a bound on text) is skipped rather than failed.
/// Lengths are counted in characters, not bytes.
pub fn validate(input: &Validatable) -> bool {
    let mut is_valid = true;

    if input.required {
        is_valid &= !input.value.to_string().trim().is_empty();
    }

    match &input.value {
        Value::Text(text) => {
            let length = text.chars().count();
            if let Some(min_length) = input.min_length {
                is_valid &= length >= min_length;
            }
            if let Some(max_length) = input.max_length {
                is_valid &= length <= max_length;
            }
        }
        Value::Number(number) => {
            // NaN compares false against every bound
            if let Some(min) = input.min {
                is_valid &= *number >= min;
            }
            if let Some(max) = input.max {
                is_valid &= *number <= max;
            }
        }
    }

    is_valid
}

/// Validates every input, passing only when all of them pass
pub fn validate_all(inputs: &[Validatable]) -> bool {
    inputs.iter().all(validate)
}

/// Coerces raw form text to a number the way an HTML number field is read.
///
/// Surrounding whitespace is ignored, blank input reads as zero and anything
/// unparseable reads as NaN (which then fails any `min`/`max` rule).
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        s if s
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
        {
            f64::NAN
        }
        s => s.parse::<f64>().unwrap_or(f64::NAN),
    }
}
