//! 2D simplex noise with a seeded permutation table.

const GRAD3: [[f64; 2]; 12] = [
    [1.0, 1.0], [-1.0, 1.0], [1.0, -1.0], [-1.0, -1.0],
    [1.0, 0.0], [-1.0, 0.0], [1.0, 0.0], [-1.0, 0.0],
    [0.0, 1.0], [0.0, -1.0], [0.0, 1.0], [0.0, -1.0],
];

/// Seeded 2D simplex noise. Output is roughly in [-1, 1].
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl SimplexNoise {
    /// Build the permutation table with a Park-Miller shuffle of 0..=255.
    pub fn new(seed: i32) -> Self {
        let mut p = [0u8; 256];
        for (i, v) in p.iter_mut().enumerate() {
            *v = i as u8;
        }
        let mut s = seed as i64;
        for i in (1..256usize).rev() {
            s = ((s.wrapping_mul(16807) as u32) & 0x7fff_ffff) as i64;
            let j = (s % (i as i64 + 1)) as usize;
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for i in 0..512 {
            perm[i] = p[i & 255];
            perm_mod12[i] = perm[i] % 12;
        }
        Self { perm, perm_mod12 }
    }

    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let f2 = 0.5 * (3f64.sqrt() - 1.0);
        let g2 = (3.0 - 3f64.sqrt()) / 6.0;

        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let corner = |gi: usize, cx: f64, cy: f64| -> f64 {
            let mut t = 0.5 - cx * cx - cy * cy;
            if t < 0.0 {
                return 0.0;
            }
            t *= t;
            let g = GRAD3[gi];
            t * t * (g[0] * cx + g[1] * cy)
        };

        let gi0 = self.perm_mod12[ii + self.perm[jj] as usize] as usize;
        let gi1 = self.perm_mod12[ii + i1 + self.perm[jj + j1] as usize] as usize;
        let gi2 = self.perm_mod12[ii + 1 + self.perm[jj + 1] as usize] as usize;

        70.0 * (corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2))
    }
}
