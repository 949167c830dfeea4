use std::fmt;
use std::sync::Arc;

use crate::core::error::ConfigurationError;
use crate::core::ssl::TlsParameters;
use crate::core::worker_pool::WorkerPoolHandle;

/// A single option value as supplied by the uri query or by code.
///
/// Values parsed from a uri are always `Text`; typed options coerce them when
/// bound. Shared resources can only be passed by reference from code.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Text(String),
    Bool(bool),
    Int(i64),
    WorkerPool(WorkerPoolHandle),
    Tls(Arc<TlsParameters>),
}

impl OptionValue {
    pub fn to_text(&self, option: &str) -> Result<String, ConfigurationError> {
        match self {
            OptionValue::Text(s) => Ok(s.clone()),
            OptionValue::Bool(b) => Ok(b.to_string()),
            OptionValue::Int(i) => Ok(i.to_string()),
            other => Err(ConfigurationError::invalid(option, "string", other)),
        }
    }

    pub fn to_bool(&self, option: &str) -> Result<bool, ConfigurationError> {
        match self {
            OptionValue::Bool(b) => Ok(*b),
            OptionValue::Text(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            OptionValue::Text(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(ConfigurationError::invalid(option, "boolean", other)),
        }
    }

    pub fn to_u64(&self, option: &str) -> Result<u64, ConfigurationError> {
        let parsed = match self {
            OptionValue::Int(i) => u64::try_from(*i).ok(),
            OptionValue::Text(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| ConfigurationError::invalid(option, "unsigned integer", self))
    }

    pub fn to_u32(&self, option: &str) -> Result<u32, ConfigurationError> {
        let wide = self.to_u64(option)?;
        u32::try_from(wide).map_err(|_| ConfigurationError::invalid(option, "unsigned 32-bit integer", self))
    }

    pub fn to_worker_pool(&self, option: &str) -> Result<WorkerPoolHandle, ConfigurationError> {
        match self {
            OptionValue::WorkerPool(pool) => Ok(pool.clone()),
            other => Err(ConfigurationError::invalid(option, "worker pool reference", other)),
        }
    }

    pub fn to_tls(&self, option: &str) -> Result<Arc<TlsParameters>, ConfigurationError> {
        match self {
            OptionValue::Tls(tls) => Ok(Arc::clone(tls)),
            other => Err(ConfigurationError::invalid(option, "tls parameters reference", other)),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => write!(f, "{:?}", s),
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::WorkerPool(_) => write!(f, "<worker pool>"),
            OptionValue::Tls(_) => write!(f, "<tls parameters>"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<WorkerPoolHandle> for OptionValue {
    fn from(value: WorkerPoolHandle) -> Self {
        OptionValue::WorkerPool(value)
    }
}

impl From<Arc<TlsParameters>> for OptionValue {
    fn from(value: Arc<TlsParameters>) -> Self {
        OptionValue::Tls(value)
    }
}

/// Order-preserving option bag. Re-inserting a name replaces the value in
/// place, so a repeated query key resolves to its last occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, OptionValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Option<OptionValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Setter registered for an option name. Receives the option name as supplied
/// so error messages and prefixed options can refer to it.
pub type Setter<T> = fn(&mut T, &str, &OptionValue) -> Result<(), ConfigurationError>;

/// A type whose options can be bound by name.
///
/// Option tables are plain `'static` slices, so the set of accepted names is
/// fixed at compile time.
pub trait Configurable: Sized + 'static {
    fn options() -> &'static [(&'static str, Setter<Self>)];

    /// Options matched by prefix, e.g. `additionalProperties.`.
    fn prefixed_options() -> &'static [(&'static str, Setter<Self>)] {
        &[]
    }

    fn setter_for(name: &str) -> Option<Setter<Self>> {
        Self::options()
            .iter()
            .find(|(option, _)| *option == name)
            .or_else(|| {
                Self::prefixed_options()
                    .iter()
                    .find(|(prefix, _)| name.len() > prefix.len() && name.starts_with(prefix))
            })
            .map(|(_, setter)| *setter)
    }
}

/// Binds every option `T` recognises, in param order, and returns the names it
/// accepted. Names `T` does not know are skipped, so the caller decides
/// whether leftovers are an error.
pub fn bind<'p, T: Configurable>(
    target: &mut T,
    params: &'p Params,
) -> Result<Vec<&'p str>, ConfigurationError> {
    let mut accepted = Vec::new();
    for (name, value) in params.iter() {
        if let Some(setter) = T::setter_for(name) {
            setter(target, name, value)?;
            accepted.push(name);
        }
    }
    Ok(accepted)
}

/// Like [`bind`] but every name must be recognised.
pub fn bind_all<T: Configurable>(target: &mut T, params: &Params) -> Result<(), ConfigurationError> {
    let accepted = bind(target, params)?;
    match first_unaccepted(params, &[accepted.as_slice()]) {
        Some(option) => Err(ConfigurationError::UnknownOption {
            option: option.to_string(),
        }),
        None => Ok(()),
    }
}

/// A configurable type wrapping another one, e.g. an endpoint and its
/// configuration.
pub trait Layered: Configurable {
    type Inner: Configurable;

    fn inner_mut(&mut self) -> &mut Self::Inner;
}

/// Binds `params` onto the inner value first and onto `target` second.
///
/// Outer setters therefore see the inner value fully bound, and an option
/// known to both ends up with whatever the outer setter wrote. A name
/// neither layer knows fails with `UnknownOption`.
pub fn bind_layered<T: Layered>(target: &mut T, params: &Params) -> Result<(), ConfigurationError> {
    let on_inner = bind(target.inner_mut(), params)?;
    let on_outer = bind(target, params)?;
    match first_unaccepted(params, &[on_inner.as_slice(), on_outer.as_slice()]) {
        Some(option) => Err(ConfigurationError::UnknownOption {
            option: option.to_string(),
        }),
        None => Ok(()),
    }
}

/// First name, in param order, accepted by none of the given passes.
fn first_unaccepted<'p>(params: &'p Params, passes: &[&[&str]]) -> Option<&'p str> {
    params
        .iter()
        .map(|(name, _)| name)
        .find(|name| !passes.iter().any(|accepted| accepted.contains(name)))
}
