//! Singular values and right singular vectors of a term-by-sentence matrix.
//!
//! The eigenvalues of the Gram matrix `AᵀA` are the squared singular values
//! of `A` and its eigenvectors are the right singular vectors. The Gram matrix
//! is `n x n` in the number of sentences however large the vocabulary is. It
//! is reduced to tridiagonal form with Householder reflections and then
//! diagonalized with the implicit QL method. Every step runs in a fixed order,
//! so the result is identical between runs. The left vectors are never formed.

use ndarray::{s, Array1, Array2, Axis, Zip};

const TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 64;

#[derive(Debug, Clone)]
pub struct Svd {
    /// Sorted descending.
    pub singular_values: Array1<f64>,
    /// `n x n`; column `i` is the right singular vector of `singular_values[i]`.
    pub v: Array2<f64>,
}

pub fn svd(matrix: &Array2<f64>) -> Svd {
    let gram = matrix.t().dot(matrix);
    let n = gram.nrows();
    // eigenvalues this small relative to the whole matrix count as zero
    let floor = TOLERANCE * gram.diag().sum();

    let (mut d, mut e, v) = tridiagonalize(gram);
    // eigenvectors as rows, so each QL rotation touches two contiguous rows
    let mut vt = v.t().as_standard_layout().into_owned();
    diagonalize(&mut d, &mut e, &mut vt);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| d[y].total_cmp(&d[x]).then(x.cmp(&y)));

    Svd {
        singular_values: order
            .iter()
            .map(|&i| if d[i] > floor { d[i].sqrt() } else { 0.0 })
            .collect(),
        v: vt.select(Axis(0), &order).reversed_axes(),
    }
}

/// Householder reduction of a symmetric matrix. Returns the diagonal, the
/// subdiagonal (in `e[1..]`) and the accumulated orthogonal transform.
fn tridiagonalize(mut v: Array2<f64>) -> (Vec<f64>, Vec<f64>, Array2<f64>) {
    let n = v.nrows();
    let mut e = vec![0.0; n];
    if n == 0 {
        return (vec![], e, v);
    }
    let mut d = v.row(n - 1).to_vec();

    for i in (1..n).rev() {
        let scale: f64 = d[..i].iter().map(|x| x.abs()).sum();
        let mut h = 0.0;

        if scale == 0.0 {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[[i - 1, j]];
                v[[i, j]] = 0.0;
                v[[j, i]] = 0.0;
            }
        } else {
            for x in &mut d[..i] {
                *x /= scale;
                h += *x * *x;
            }
            let mut f = d[i - 1];
            let mut g = if f > 0.0 { -h.sqrt() } else { h.sqrt() };
            e[i] = scale * g;
            h -= f * g;
            d[i - 1] = f - g;
            e[..i].fill(0.0);

            for j in 0..i {
                f = d[j];
                v[[j, i]] = f;
                g = e[j] + v[[j, j]] * f;
                for k in (j + 1)..i {
                    g += v[[k, j]] * d[k];
                    e[k] += v[[k, j]] * f;
                }
                e[j] = g;
            }

            f = 0.0;
            for j in 0..i {
                e[j] /= h;
                f += e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] -= hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    v[[k, j]] -= f * e[k] + g * d[k];
                }
                d[j] = v[[i - 1, j]];
                v[[i, j]] = 0.0;
            }
        }
        d[i] = h;
    }

    for i in 0..n - 1 {
        v[[n - 1, i]] = v[[i, i]];
        v[[i, i]] = 1.0;
        let h = d[i + 1];
        if h != 0.0 {
            for k in 0..=i {
                d[k] = v[[k, i + 1]] / h;
            }
            for j in 0..=i {
                let g: f64 = (0..=i).map(|k| v[[k, i + 1]] * v[[k, j]]).sum();
                for k in 0..=i {
                    v[[k, j]] -= g * d[k];
                }
            }
        }
        for k in 0..=i {
            v[[k, i + 1]] = 0.0;
        }
    }
    for j in 0..n {
        d[j] = v[[n - 1, j]];
        v[[n - 1, j]] = 0.0;
    }
    v[[n - 1, n - 1]] = 1.0;
    e[0] = 0.0;

    (d, e, v)
}

/// Implicit QL on the tridiagonal matrix. Leaves the eigenvalues in `d` and
/// applies every rotation to the rows of `vt`.
fn diagonalize(d: &mut [f64], e: &mut [f64], vt: &mut Array2<f64>) {
    let n = d.len();
    if n == 0 {
        return;
    }
    e.copy_within(1.., 0);
    e[n - 1] = 0.0;

    let mut shift = 0.0;
    let mut norm = 0.0_f64;
    for l in 0..n {
        norm = norm.max(d[l].abs() + e[l].abs());
        let mut m = l;
        while m < n - 1 && e[m].abs() > f64::EPSILON * norm {
            m += 1;
        }

        if m > l {
            for _ in 0..MAX_ITERATIONS {
                let mut g = d[l];
                let mut p = (d[l + 1] - g) / (2.0 * e[l]);
                let mut r = if p < 0.0 { -p.hypot(1.0) } else { p.hypot(1.0) };
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let mut h = g - d[l];
                for x in &mut d[l + 2..] {
                    *x -= h;
                }
                shift += h;

                p = d[m];
                let (mut c, mut c2, mut c3) = (1.0, 1.0, 1.0);
                let (mut sn, mut s2) = (0.0, 0.0);
                let el1 = e[l + 1];
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = sn;
                    g = c * e[i];
                    h = c * p;
                    r = p.hypot(e[i]);
                    e[i + 1] = sn * r;
                    sn = e[i] / r;
                    c = p / r;
                    p = c * d[i] - sn * g;
                    d[i + 1] = h + sn * (c * g + sn * d[i]);
                    rotate(vt, i, c, sn);
                }
                p = -sn * s2 * c3 * el1 * e[l] / dl1;
                e[l] = sn * p;
                d[l] = c * p;

                if e[l].abs() <= f64::EPSILON * norm {
                    break;
                }
            }
        }
        d[l] += shift;
        e[l] = 0.0;
    }
}

fn rotate(vt: &mut Array2<f64>, i: usize, cos: f64, sin: f64) {
    let (lo, hi) = vt.multi_slice_mut((s![i, ..], s![i + 1, ..]));
    Zip::from(lo).and(hi).for_each(|a, b| {
        let h = *b;
        *b = sin * *a + cos * h;
        *a = cos * *a - sin * h;
    });
}
