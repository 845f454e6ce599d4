/// Dense symmetric N x N cosine-similarity matrix over count vectors.
/// Built once at load time; immutable afterward.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Cosine similarity for every pair, with precomputed norms. A zero-norm
    /// vector (empty tag) scores 0.0 against everything, itself included;
    /// the guard runs before any division so no NaN can escape.
    pub fn compute(vectors: &[Vec<u32>]) -> Self {
        let n = vectors.len();
        let norms: Vec<f32> = vectors.iter().map(|v| norm(v)).collect();
        let mut values = vec![0.0f32; n * n];

        for i in 0..n {
            if norms[i] == 0.0 {
                continue;
            }
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                if norms[j] == 0.0 {
                    continue;
                }
                let score = dot(&vectors[i], &vectors[j]) / (norms[i] * norms[j]);
                values[i * n + j] = score;
                values[j * n + i] = score;
            }
        }

        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.n + j]
    }

    /// Similarity of item `i` against every item, indexed by catalog order.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.n..(i + 1) * self.n]
    }
}

fn dot(a: &[u32], b: &[u32]) -> f32 {
    let sum: u64 = a.iter().zip(b).map(|(&x, &y)| x as u64 * y as u64).sum();
    sum as f32
}

fn norm(v: &[u32]) -> f32 {
    let sum: u64 = v.iter().map(|&x| x as u64 * x as u64).sum();
    (sum as f32).sqrt()
}
