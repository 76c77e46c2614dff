//! The seam to an external geometry kernel.

use nalgebra::Isometry3;

use crate::primitive::Primitive;

/// A backend that turns a [`Solid`](crate::Solid) tree into something
/// concrete: a mesh, a B-rep, source text, or a bounding box.
///
/// [`Solid::evaluate`](crate::Solid::evaluate) walks the tree bottom-up and
/// calls one method per node, so a kernel never sees the tree itself.
///
/// # Example
///
/// ```
/// use pipe_geometry::{GeometryKernel, Primitive, Solid};
/// use nalgebra::Isometry3;
///
/// /// Counts primitives.
/// struct Counter;
///
/// impl GeometryKernel for Counter {
///     type Output = usize;
///     type Error = std::convert::Infallible;
///
///     fn empty(&mut self) -> Result<usize, Self::Error> { Ok(0) }
///     fn primitive(&mut self, _: &Primitive) -> Result<usize, Self::Error> { Ok(1) }
///     fn transform(&mut self, _: &Isometry3<f64>, child: usize) -> Result<usize, Self::Error> {
///         Ok(child)
///     }
///     fn union(&mut self, children: Vec<usize>) -> Result<usize, Self::Error> {
///         Ok(children.iter().sum())
///     }
///     fn difference(&mut self, base: usize, cut: usize) -> Result<usize, Self::Error> {
///         Ok(base + cut)
///     }
///     fn intersection(&mut self, children: Vec<usize>) -> Result<usize, Self::Error> {
///         Ok(children.iter().sum())
///     }
/// }
///
/// let solid = Solid::cylinder(10.0, 5.0).union(Solid::sphere(3.0));
/// assert_eq!(solid.evaluate(&mut Counter), Ok(2));
/// ```
pub trait GeometryKernel {
    /// What an evaluated node becomes.
    type Output;

    /// Failure reported by the backend.
    type Error;

    /// The empty solid.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn empty(&mut self) -> Result<Self::Output, Self::Error>;

    /// A primitive in its canonical frame.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn primitive(&mut self, primitive: &Primitive) -> Result<Self::Output, Self::Error>;

    /// A child moved by a rigid transform.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn transform(
        &mut self,
        transform: &Isometry3<f64>,
        child: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    /// Boolean union of every child.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn union(&mut self, children: Vec<Self::Output>) -> Result<Self::Output, Self::Error>;

    /// `base` minus `cut`.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn difference(
        &mut self,
        base: Self::Output,
        cut: Self::Output,
    ) -> Result<Self::Output, Self::Error>;

    /// Boolean intersection of every child.
    ///
    /// # Errors
    ///
    /// Backend specific.
    fn intersection(&mut self, children: Vec<Self::Output>) -> Result<Self::Output, Self::Error>;
}
