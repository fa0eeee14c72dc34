//! Fuzz target capability interface.

/// A fuzz target as seen by the replay driver.
///
/// Mirrors the libFuzzer contract: an optional one-time `initialize`
/// followed by any number of `test_one_input` calls. Return values are
/// reported but carry no meaning for the driver.
pub trait FuzzTarget {
    /// Human-readable name for logs and reports
    fn name(&self) -> &str;

    /// One-time setup hook.
    ///
    /// `args` is empty unless argument forwarding is enabled. The driver
    /// guarantees at most one call per driver.
    fn initialize(&mut self, _args: &[String]) -> i32 {
        0
    }

    /// Run the target on one input.
    ///
    /// May abort the process; callers must not assume it returns.
    fn test_one_input(&mut self, data: &[u8]) -> i32;
}

impl<T: FuzzTarget + ?Sized> FuzzTarget for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self, args: &[String]) -> i32 {
        (**self).initialize(args)
    }

    fn test_one_input(&mut self, data: &[u8]) -> i32 {
        (**self).test_one_input(data)
    }
}

impl<T: FuzzTarget + ?Sized> FuzzTarget for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn initialize(&mut self, args: &[String]) -> i32 {
        (**self).initialize(args)
    }

    fn test_one_input(&mut self, data: &[u8]) -> i32 {
        (**self).test_one_input(data)
    }
}

/// Init hook for [`FnTarget`]
type InitFn = Box<dyn FnMut(&[String]) -> i32>;

/// Target backed by Rust closures
pub struct FnTarget<F> {
    name: String,
    body: F,
    init: Option<InitFn>,
}

impl<F> FnTarget<F>
where
    F: FnMut(&[u8]) -> i32,
{
    /// Create a target from a per-input closure
    #[must_use]
    pub fn new(name: impl Into<String>, body: F) -> Self {
        Self {
            name: name.into(),
            body,
            init: None,
        }
    }

    /// Attach an init hook
    #[must_use]
    pub fn with_init(mut self, init: impl FnMut(&[String]) -> i32 + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }
}

impl<F> FuzzTarget for FnTarget<F>
where
    F: FnMut(&[u8]) -> i32,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, args: &[String]) -> i32 {
        match self.init.as_mut() {
            Some(init) => init(args),
            None => 0,
        }
    }

    fn test_one_input(&mut self, data: &[u8]) -> i32 {
        (self.body)(data)
    }
}

impl<F> std::fmt::Debug for FnTarget<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTarget")
            .field("name", &self.name)
            .field("has_init", &self.init.is_some())
            .finish()
    }
}
