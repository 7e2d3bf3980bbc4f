//! Pipeline stage abstractions.
//!
//! Classification is a fixed sequence of named stages. Each stage takes its
//! input by value and returns a new value, so any stage can be run and
//! inspected on its own.

use std::marker::PhantomData;

/// A pipeline stage that transforms data.
///
/// The type system ensures stages can only be chained when their types align:
/// ```rust,ignore
/// stage1  // Input: A, Output: B
///   .then(stage2)  // Input: B, Output: C - OK!
///   .then(stage3)  // Input: D, Output: E - Compile error!
/// ```
pub trait Stage {
    type Input;
    type Output;
    type Error;

    /// Execute this stage with the given input.
    fn execute(&self, input: Self::Input) -> Result<Self::Output, Self::Error>;

    /// Get the stage name for logging.
    fn name(&self) -> &str;
}

/// A pure stage that performs no I/O.
///
/// # Example
///
/// ```rust
/// use nativegen::pipeline::stage::{PureStage, Stage};
///
/// let stage = PureStage::new("Double", |x: i32| x * 2);
/// assert_eq!(stage.execute(21).unwrap(), 42);
/// ```
pub struct PureStage<F, I, O> {
    name: String,
    func: F,
    _phantom: PhantomData<(I, O)>,
}

impl<F, I, O> PureStage<F, I, O>
where
    F: Fn(I) -> O,
{
    /// Create a new pure stage with a name and transformation function.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, I, O> Stage for PureStage<F, I, O>
where
    F: Fn(I) -> O,
{
    type Input = I;
    type Output = O;
    type Error = std::convert::Infallible;

    fn execute(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        Ok((self.func)(input))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Run a stage that cannot fail.
pub fn run_infallible<S, I, O>(stage: &S, input: I) -> O
where
    S: Stage<Input = I, Output = O, Error = std::convert::Infallible> + ?Sized,
{
    match stage.execute(input) {
        Ok(output) => output,
        Err(never) => match never {},
    }
}
