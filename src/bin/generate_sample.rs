use std::fmt::Write as _;
use std::path::PathBuf;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn generate_spectrum(
    wavelengths: &[f64],
    peak: (f64, f64, f64),
    background: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    let (mu, sigma, amp) = peak;
    wavelengths
        .iter()
        .map(|&wl| (gaussian(wl, mu, sigma, amp) + background + rng.gauss(0.0, noise_level)).max(0.0))
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Spectrometer-style file: `#` metadata block, column header, tab-separated rows.
fn render_file(sample: &str, well_width_nm: f64, wavelengths: &[f64], intensities: &[f64]) -> String {
    let mut out = String::new();
    writeln!(out, "# Sample: {sample}").unwrap();
    writeln!(out, "# Well width [nm]: {well_width_nm:.1}").unwrap();
    writeln!(out, "# Excitation: 325 nm HeCd").unwrap();
    writeln!(out, "# Integration time: 100 ms").unwrap();
    writeln!(out, "# Temperature: 295 K").unwrap();
    writeln!(out, "lambda [nm]\tintensity [a.u.]").unwrap();
    for (wl, i) in wavelengths.iter().zip(intensities) {
        writeln!(out, "{wl:.2}\t{i:.6}").unwrap();
    }
    out
}

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("PL_Spectra_Raw"));
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let mut rng = SimpleRng::new(42);

    // Wavelengths: 400 → 599.5 nm, step 0.5
    let wavelengths: Vec<f64> = (0..400).map(|i| 400.0 + i as f64 * 0.5).collect();

    // (sample, well width, emission centre, linewidth, amplitude)
    let samples = [
        ("G25-021-center", 2.0, 448.0, 6.0, 1.8),
        ("G25-022-center", 2.5, 462.5, 7.0, 1.4),
        ("G25-023-center", 3.0, 478.0, 8.0, 1.1),
        ("G25-023-edge", 3.0, 481.5, 9.0, 0.7),
        ("G25-024-center", 3.5, 495.0, 9.5, 0.9),
    ];

    for &(sample, well_width, mu, sigma, amp) in &samples {
        let y = generate_spectrum(&wavelengths, (mu, sigma, amp), 0.02, 0.01, &mut rng);
        let path = out_dir.join(format!("{sample}.csv"));
        std::fs::write(&path, render_file(sample, well_width, &wavelengths, &y))
            .expect("Failed to write spectrum file");
    }

    // A measurement that was aborted before any data was recorded.
    std::fs::write(
        out_dir.join("G25-025-center.csv"),
        "# Sample: G25-025-center\n# Aborted\nlambda [nm]\tintensity [a.u.]\n",
    )
    .expect("Failed to write spectrum file");

    // An export with the column header missing.
    std::fs::write(
        out_dir.join("G25-026-center.csv"),
        "# Sample: G25-026-center\n450.0\t0.5\n451.0\t0.6\n",
    )
    .expect("Failed to write spectrum file");

    println!(
        "Wrote {} spectra ({} wavelengths each) plus 2 broken files to {}",
        samples.len(),
        wavelengths.len(),
        out_dir.display()
    );
}
