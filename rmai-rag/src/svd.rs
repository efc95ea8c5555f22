//! Truncated SVD through the eigen-decomposition of a Gram matrix.
//!
//! For an `n × f` matrix `X` with `n` much smaller than `f` (a handful of
//! texts over thousands of n-grams) it is cheaper to decompose the `n × n`
//! Gram matrix `G = X·Xᵀ = U·Σ²·Uᵀ` than `X` itself. The reduced
//! representation `X·V = U·Σ` follows directly from the eigenpairs of `G`.

use ndarray::{Array1, Array2};

const MAX_SWEEPS: usize = 64;

/// Eigenvalues at or below this are treated as numerical zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// Project onto the top `k` right singular vectors, given the Gram matrix of
/// the input rows.
///
/// Returns `U·Σ` with exactly `k` columns. Columns past the numerical rank of
/// the input are zero. Each column's sign is chosen so that the entry of
/// largest magnitude in the left singular vector is positive, which makes the
/// output a pure function of `gram`.
pub fn truncated_svd(gram: Array2<f64>, k: usize) -> Array2<f64> {
    let n = gram.nrows();
    let (eigenvalues, eigenvectors) = symmetric_eigen(gram);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b].partial_cmp(&eigenvalues[a]).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut projected = Array2::<f64>::zeros((n, k));
    for (component, &idx) in order.iter().take(k).enumerate() {
        let lambda = eigenvalues[idx];
        if lambda <= RANK_TOLERANCE {
            continue;
        }
        let sigma = lambda.sqrt();
        let u = eigenvectors.column(idx);

        let mut pivot = 0;
        for i in 1..n {
            if u[i].abs() > u[pivot].abs() {
                pivot = i;
            }
        }
        let sign = if u[pivot] < 0.0 { -1.0 } else { 1.0 };

        for i in 0..n {
            projected[[i, component]] = sign * u[i] * sigma;
        }
    }
    projected
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix.
///
/// Returns the eigenvalues (unsorted, in diagonal order) and the matrix whose
/// columns are the matching unit eigenvectors.
fn symmetric_eigen(mut a: Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = a.nrows();
    let mut v = Array2::<f64>::eye(n);
    let scale = a.iter().map(|x| x * x).sum::<f64>().max(f64::MIN_POSITIVE);

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[[p, q]] * a[[p, q]];
            }
        }
        if off <= 1e-24 * scale {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq.abs() <= f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    (a.diag().to_owned(), v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn gram_of(x: &Array2<f64>) -> Array2<f64> {
        x.dot(&x.t())
    }

    #[test]
    fn eigen_decomposition_reconstructs_input() {
        let g = array![[4.0, 1.0, 2.0], [1.0, 3.0, 0.5], [2.0, 0.5, 5.0]];
        let (values, vectors) = symmetric_eigen(g.clone());
        let rebuilt = vectors.dot(&Array2::from_diag(&values)).dot(&vectors.t());
        for (a, b) in rebuilt.iter().zip(g.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} != {b}");
        }
    }

    #[test]
    fn full_rank_projection_preserves_inner_products() {
        let x = array![[1.0, 0.0, 2.0, 0.0], [0.5, 1.0, 0.0, 0.0], [0.0, 1.0, 1.0, 3.0]];
        let g = gram_of(&x);
        let projected = truncated_svd(g.clone(), 16);
        assert_eq!(projected.dim(), (3, 16));
        let g2 = gram_of(&projected);
        for (a, b) in g2.iter().zip(g.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn truncation_keeps_the_dominant_direction() {
        let x = array![[3.0, 0.0], [0.0, 1.0]];
        let projected = truncated_svd(gram_of(&x), 1);
        assert!((projected[[0, 0]] - 3.0).abs() < 1e-9);
        assert!(projected[[1, 0]].abs() < 1e-9);
    }

    #[test]
    fn zero_matrix_projects_to_zero() {
        let projected = truncated_svd(Array2::zeros((2, 2)), 4);
        assert!(projected.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn signs_are_fixed() {
        let x = array![[1.0, 1.0], [1.0, 0.9]];
        let projected = truncated_svd(gram_of(&x), 2);
        assert!(projected[[0, 0]] > 0.0 && projected[[1, 0]] > 0.0);
    }
}
