use serde::{Deserialize, Serialize};

/// Geographic fix recorded with a punch, as handed over by the capturing
/// device. The core never queries location itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, as reported by the provider.
    pub accuracy_m: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m,
        }
    }

    /// Parse the CLI form "lat,lon[,accuracy]".
    pub fn from_code(code: &str) -> Option<Self> {
        let parts: Vec<&str> = code.split(',').map(str::trim).collect();
        if parts.len() < 2 || parts.len() > 3 {
            return None;
        }
        let latitude: f64 = parts[0].parse().ok()?;
        let longitude: f64 = parts[1].parse().ok()?;
        let accuracy_m: f64 = match parts.get(2) {
            Some(a) => a.parse().ok()?,
            None => 0.0,
        };
        Some(Self {
            latitude,
            longitude,
            accuracy_m,
        })
    }

    pub fn display(&self) -> String {
        format!(
            "{:.5},{:.5} (±{:.0}m)",
            self.latitude, self.longitude, self.accuracy_m
        )
    }
}
