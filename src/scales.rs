use d3rs::scale::{LinearScale, Scale as D3Scale};

/// Linear mapping between a data domain and a pixel range.
///
/// The range may be inverted (`range.0 > range.1`), which is how the price axis
/// puts larger values nearer the top of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScale {
    inner: LinearScale,
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        Self {
            inner: LinearScale::new().domain(d_min, d_max).range(range.0, range.1),
        }
    }

    pub fn map(&self, value: f64) -> f64 {
        let res = self.inner.scale(value);
        if res.is_finite() {
            res
        } else {
            0.0
        }
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        self.inner
            .invert(pixel)
            .filter(|v| v.is_finite())
            .unwrap_or_else(|| self.inner.domain_min())
    }

    pub fn domain(&self) -> (f64, f64) {
        D3Scale::domain(&self.inner)
    }

    /// Pixels per domain unit (signed).
    pub fn slope(&self) -> f64 {
        let (d0, d1) = D3Scale::domain(&self.inner);
        let (r0, r1) = D3Scale::range(&self.inner);
        (r1 - r0) / (d1 - d0)
    }

    pub fn format_tick(&self, value: f64) -> String {
        if value.abs() < 0.001 && value.abs() > 0.0 {
            format!("{:.4}", value)
        } else if value.abs() > 1000.0 {
            format!("{:.0}", value)
        } else {
            format!("{:.2}", value)
        }
    }
}
