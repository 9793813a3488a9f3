//! Vector fields and parametric curves built from [`Expr`]s.
//!
//! A [`VectorField`] assigns the vector `(i(x, y, z), j(x, y, z), k(x, y, z))` to every point in
//! space, and a [`Curve`] traces the point `(x(t), y(t), z(t))`. Both only evaluate their
//! component expressions; they do not validate which symbols the components use.

use crate::numerical::fmt::{trim_zeroes, DEFAULT_TRIM_PRECISION};
use crate::symbolic::expr::{Expr, Markup, Symbol};
use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The smallest parameter range a [`Curve`] can be sampled over.
pub const MIN_T_RANGE: f32 = 0.005;

/// The most points [`VectorField::length_range`] or [`Curve::sample`] will evaluate.
pub const MAX_SAMPLES: usize = 1 << 20;

/// A point or vector in 3D space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the Euclidean length of the vector.
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Formats the vector as `{ x, y, z }`, with at most two decimals per component.
impl Display for Vec3 {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{{ {}, {}, {} }}",
            trim_zeroes(self.x, DEFAULT_TRIM_PRECISION),
            trim_zeroes(self.y, DEFAULT_TRIM_PRECISION),
            trim_zeroes(self.z, DEFAULT_TRIM_PRECISION),
        )
    }
}

/// Returns the greatest `n` for which `start + n * step <= end`.
///
/// Returns [`None`] if there is no such `n`, an argument is not finite, `step` is not positive,
/// or there would be more than [`MAX_SAMPLES`] values.
fn last_index(start: f32, end: f32, step: f32) -> Option<usize> {
    if !(start.is_finite() && end.is_finite() && step.is_finite() && step > 0.0) {
        return None;
    }

    let last = ((end - start) / step).floor();
    if !(last >= 0.0) || last >= MAX_SAMPLES as f32 {
        return None;
    }
    Some(last as usize)
}

/// Folds an iterator of lengths into its minimum and maximum. Returns [`None`] if the iterator
/// is empty.
fn min_max(lengths: impl IntoIterator<Item = f32>) -> Option<(f32, f32)> {
    lengths.into_iter().fold(None, |acc, len| match acc {
        None => Some((len, len)),
        Some((min, max)) => Some((min.min(len), max.max(len))),
    })
}

/// A vector field `F(x, y, z) = i(x, y, z) i + j(x, y, z) j + k(x, y, z) k`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VectorField {
    pub i: Expr,
    pub j: Expr,
    pub k: Expr,
}

impl VectorField {
    pub fn new(i: Expr, j: Expr, k: Expr) -> Self {
        Self { i, j, k }
    }

    /// Evaluates the field at the given point.
    pub fn eval(&self, x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(self.i.eval(x, y, z), self.j.eval(x, y, z), self.k.eval(x, y, z))
    }

    /// Returns the end point of the field vector drawn from the given point.
    pub fn end(&self, x: f32, y: f32, z: f32) -> Vec3 {
        Vec3::new(x, y, z) + self.eval(x, y, z)
    }

    /// Computes the curl of the field, with each component simplified.
    ///
    /// ```text
    /// curl F = (dk/dy - dj/dz) i + (di/dz - dk/dx) j + (dj/dx - di/dy) k
    /// ```
    pub fn curl(&self) -> VectorField {
        let partial = |f: &Expr, g: &Expr, wrt_f: Symbol, wrt_g: Symbol| {
            Expr::sub(f.derivative(wrt_f), g.derivative(wrt_g)).simplify()
        };

        VectorField {
            i: partial(&self.k, &self.j, Symbol::Y, Symbol::Z),
            j: partial(&self.i, &self.k, Symbol::Z, Symbol::X),
            k: partial(&self.j, &self.i, Symbol::X, Symbol::Y),
        }
    }

    /// Samples the field on a grid covering `[-x_range, x_range] x [-y_range, y_range] x
    /// [-z_range, z_range]`, stepping by `step` along each axis, and returns the smallest and
    /// largest vector length found.
    ///
    /// Returns [`None`] if `step` is not positive, an argument is not finite, no grid point falls
    /// in the box, or the grid has more than [`MAX_SAMPLES`] points.
    pub fn length_range(
        &self,
        x_range: f32,
        y_range: f32,
        z_range: f32,
        step: f32,
    ) -> Option<(f32, f32)> {
        let last_x = last_index(-x_range, x_range, step)?;
        let last_y = last_index(-y_range, y_range, step)?;
        let last_z = last_index(-z_range, z_range, step)?;
        let points = (last_x + 1)
            .checked_mul(last_y + 1)?
            .checked_mul(last_z + 1)?;
        if points > MAX_SAMPLES {
            return None;
        }

        let coord = move |range: f32, n: usize| -range + n as f32 * step;
        let lengths = (0..=last_x)
            .flat_map(move |a| (0..=last_y).flat_map(move |b| (0..=last_z).map(move |c| (a, b, c))))
            .map(|(a, b, c)| {
                self.eval(coord(x_range, a), coord(y_range, b), coord(z_range, c)).length()
            });

        min_max(lengths)
    }

    /// Wraps the field in a formatter that displays its components in the given markup.
    pub fn display(&self, markup: Markup) -> VectorFieldFormatter<'_> {
        VectorFieldFormatter { field: self, markup }
    }
}

/// Formats the field as `{ i = ..., j = ..., k = ... }`, with [`Markup::Html`] components.
impl Display for VectorField {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.display(Markup::Html))
    }
}

/// A wrapper type that implements [`Display`] for a [`VectorField`] in a chosen [`Markup`].
#[derive(Debug, Clone, Copy)]
pub struct VectorFieldFormatter<'a> {
    field: &'a VectorField,
    markup: Markup,
}

impl Display for VectorFieldFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{{ i = {}, j = {}, k = {} }}",
            self.field.i.display(self.markup),
            self.field.j.display(self.markup),
            self.field.k.display(self.markup),
        )
    }
}

/// A parametric curve `r(t) = (x(t), y(t), z(t))`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curve {
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
}

/// The points of a [`Curve`] sampled by [`Curve::sample`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSamples {
    /// The distance in `t` between two consecutive points.
    pub step: f32,

    /// The sampled points, in order of increasing `t`.
    pub points: Vec<Vec3>,
}

impl CurveSamples {
    /// Returns the points at which an arrow is drawn: every other sampled point, starting with
    /// the first.
    pub fn arrows(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.points.iter().step_by(2)
    }

    /// Returns the smallest and largest length of the [arrow](Self::arrows) vectors.
    pub fn length_range(&self) -> Option<(f32, f32)> {
        min_max(self.arrows().map(Vec3::length))
    }
}

impl Curve {
    pub fn new(x: Expr, y: Expr, z: Expr) -> Self {
        Self { x, y, z }
    }

    /// Evaluates the curve at the given parameter value.
    pub fn eval(&self, t: f32) -> Vec3 {
        Vec3::new(self.x.eval_t(t), self.y.eval_t(t), self.z.eval_t(t))
    }

    /// Samples the curve over `[t_min, t_max]` so that `num_vectors` arrows can be drawn along it.
    ///
    /// Points are taken every `|t_max - t_min| / (2 * num_vectors)`, up to and including `t_max`
    /// (with a small tolerance for rounding). Returns [`None`] if `num_vectors` is zero, the
    /// range is not finite or shorter than [`MIN_T_RANGE`], or there would be more than
    /// [`MAX_SAMPLES`] points.
    pub fn sample(&self, t_min: f32, t_max: f32, num_vectors: u32) -> Option<CurveSamples> {
        if num_vectors == 0 || !(t_max - t_min >= MIN_T_RANGE) {
            return None;
        }

        let step = (t_max - t_min).abs() / (2.0 * num_vectors as f32);
        let last = last_index(t_min, t_max + MIN_T_RANGE, step)?;
        let points = (0..=last)
            .map(|n| self.eval(t_min + n as f32 * step))
            .collect();

        Some(CurveSamples { step, points })
    }
}

impl Display for Curve {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{{ x = {}, y = {}, z = {} }}", self.x, self.y, self.z)
    }
}
