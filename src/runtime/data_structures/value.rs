use std::fmt::{self, Debug, Display, Formatter};

/// A data stack slot.  Either a 32-bit signed integer or a 32-bit float, both of which can be
/// viewed as the same raw 32 bits.
#[derive(Clone, Copy, PartialEq)]
pub enum Value {
    Integer(i32),
    Float(f32),
}

/// Print the value of the slot.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{:?}", value),
        }
    }
}

/// Print the value along with which variant we're holding.
impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{} i", value),
            Value::Float(value) => write!(f, "{:?} f", value),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Value {
        Value::Float(value)
    }
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
        }
    }

    /// The raw 32 bits held in the slot.
    pub fn raw(&self) -> u32 {
        match self {
            Value::Integer(value) => *value as u32,
            Value::Float(value) => value.to_bits(),
        }
    }

    /// The slot's bits read as an integer.  A float is not converted, its bit pattern is reused.
    pub fn reinterpret_int(&self) -> i32 {
        self.raw() as i32
    }

    /// The slot's bits read as a float.  An integer is not converted, its bit pattern is reused.
    pub fn reinterpret_float(&self) -> f32 {
        f32::from_bits(self.raw())
    }
}
