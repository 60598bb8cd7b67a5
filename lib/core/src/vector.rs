use serde::{Deserialize, Serialize};

/// A dense embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Dot product using two accumulators for better pipelining
    #[inline]
    pub fn dot(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let a = &self.data;
        let b = &other.data;
        let mut sum1 = 0.0f32;
        let mut sum2 = 0.0f32;
        let mut i = 0;
        while i + 1 < a.len() {
            sum1 += a[i] * b[i];
            sum2 += a[i + 1] * b[i + 1];
            i += 2;
        }
        if i < a.len() {
            sum1 += a[i] * b[i];
        }
        sum1 + sum2
    }

    #[inline]
    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Cosine similarity in [-1, 1].
    /// Mismatched dimensions or a zero-norm side give 0.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        (self.dot(other) / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }

    /// Add `other` in place. Ignored on dimension mismatch.
    #[inline]
    pub fn add_assign(&mut self, other: &Vector) {
        if self.dim() != other.dim() {
            return;
        }
        for (x, y) in self.data.iter_mut().zip(other.data.iter()) {
            *x += y;
        }
    }

    #[inline]
    pub fn scale(&mut self, factor: f32) {
        for x in &mut self.data {
            *x *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!((v3.cosine_similarity(&v4) - 0.0).abs() < 1e-6);

        let v5 = Vector::new(vec![-2.0, 0.0]);
        assert!((v1.cosine_similarity(&v5) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        let zero = Vector::zeros(3);
        let v = Vector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);

        let short = Vector::new(vec![1.0, 2.0]);
        assert_eq!(short.cosine_similarity(&v), 0.0);
    }

    #[test]
    fn test_dot_odd_length() {
        let a = Vector::new(vec![1.0, 2.0, 3.0]);
        let b = Vector::new(vec![4.0, 5.0, 6.0]);
        assert!((a.dot(&b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_add_assign_and_scale() {
        let mut acc = Vector::zeros(2);
        acc.add_assign(&Vector::new(vec![1.0, 3.0]));
        acc.add_assign(&Vector::new(vec![3.0, 1.0]));
        acc.scale(0.5);
        assert_eq!(acc.as_slice(), &[2.0, 2.0]);
    }
}
