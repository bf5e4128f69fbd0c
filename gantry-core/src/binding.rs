// Per-request parameter binding

use crate::error::Error;
use std::any::Any;

/// Construction of a handler parameter from the single string value of a
/// named request field.
pub trait FromRequestValue: Sized {
    fn from_request_value(raw: &str) -> Result<Self, Error>;
}

impl FromRequestValue for String {
    fn from_request_value(raw: &str) -> Result<Self, Error> {
        Ok(raw.to_string())
    }
}

macro_rules! from_request_value_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(impl FromRequestValue for $ty {
            fn from_request_value(raw: &str) -> Result<Self, Error> {
                raw.parse::<$ty>().map_err(|e| {
                    Error::ParameterBinding(format!(
                        "cannot construct {} from \"{}\": {}",
                        stringify!($ty),
                        raw,
                        e
                    ))
                })
            }
        })*
    };
}

from_request_value_via_parse!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Adapter usable as the `construct` fn pointer in `ParamSpec::Bound`.
pub fn bind_value<T>(raw: &str) -> Result<Box<dyn Any + Send>, Error>
where
    T: FromRequestValue + Send + 'static,
{
    Ok(Box::new(T::from_request_value(raw)?))
}

/// Ordered argument values aligned to the target method's declared
/// parameter list. Context slots (request/response) carry no value; bound
/// slots are consumed exactly once by the method handle. Constructed per
/// request, discarded after invocation.
#[derive(Default)]
pub struct ParameterBinding {
    slots: Vec<Option<Box<dyn Any + Send>>>,
}

impl ParameterBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a context slot (request or response object).
    pub fn push_context(&mut self) {
        self.slots.push(None);
    }

    /// Append a bound value.
    pub fn push_value(&mut self, value: Box<dyn Any + Send>) {
        self.slots.push(Some(value));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take the bound value at `index`, downcast to its declared type.
    pub fn take<T: 'static>(&mut self, index: usize) -> Result<T, Error> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            Error::ParameterBinding(format!("no argument at position {index}"))
        })?;
        let value = slot.take().ok_or_else(|| {
            Error::ParameterBinding(format!(
                "argument {index} is a context slot or was already taken"
            ))
        })?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            Error::ParameterBinding(format!("argument {index} does not have the expected type"))
        })
    }
}
