use {
    super::ArtifactId,
    crate::{
        config::{CHART, Rgba},
        domain::ScenePos,
    },
    anyhow::{Result, bail},
    serde::{Deserialize, Serialize},
};

/// One Gann angle: `time_units` x `price_units`.
///
/// "1x2" covers one unit of time for two units of price, so it is twice as steep as the 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GannAngle {
    pub time_units: u32,
    pub price_units: u32,
    pub enabled: bool,
}

impl GannAngle {
    pub const fn new(time_units: u32, price_units: u32) -> Self {
        Self {
            time_units,
            price_units,
            enabled: true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.time_units > 0 && self.price_units > 0
    }

    /// Slope multiplier relative to the 1x1.
    pub fn factor(&self) -> f64 {
        self.price_units as f64 / self.time_units as f64
    }

    pub fn label(&self) -> String {
        format!("{}x{}", self.time_units, self.price_units)
    }

    pub fn defaults() -> Vec<GannAngle> {
        CHART
            .default_gann_angles
            .iter()
            .map(|&(t, p)| GannAngle::new(t, p))
            .collect()
    }
}

/// A fan of Gann angles from `origin`. The `leg` point fixes the 1x1 angle and the length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GannFanArtifact {
    pub id: ArtifactId,
    pub origin: ScenePos,
    pub leg: ScenePos,
    pub angles: Vec<GannAngle>,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GannRay {
    pub label: String,
    pub start: ScenePos,
    pub end: ScenePos,
}

impl GannFanArtifact {
    pub fn new(origin: ScenePos, leg: ScenePos) -> Self {
        Self {
            id: ArtifactId::new(),
            origin,
            leg,
            angles: GannAngle::defaults(),
            color: CHART.color_gann_fan,
        }
    }

    /// Scene slope (dy/dx) of the 1x1.
    pub fn unit_slope(&self) -> Result<f64> {
        let dx = self.leg.x - self.origin.x;
        if dx == 0.0 || !dx.is_finite() {
            bail!("Gann fan {} has no time extent; leg is vertical", self.id);
        }
        Ok((self.leg.y - self.origin.y) / dx)
    }

    pub fn slope_for(&self, angle: &GannAngle) -> Result<f64> {
        if !angle.is_valid() {
            bail!("Gann angle {} has a zero component", angle.label());
        }
        Ok(self.unit_slope()? * angle.factor())
    }

    /// Where the ray for `angle` crosses scene `x`.
    pub fn ray_end_at(&self, angle: &GannAngle, x: f64) -> Result<ScenePos> {
        let slope = self.slope_for(angle)?;
        Ok(ScenePos::new(x, self.origin.y + (x - self.origin.x) * slope))
    }

    /// Enabled rays, each running from the origin to the leg's x.
    pub fn rays(&self) -> Result<Vec<GannRay>> {
        self.rays_to(self.leg.x)
    }

    pub fn rays_to(&self, x: f64) -> Result<Vec<GannRay>> {
        self.angles
            .iter()
            .filter(|a| a.enabled)
            .map(|angle| {
                Ok(GannRay {
                    label: angle.label(),
                    start: self.origin,
                    end: self.ray_end_at(angle, x)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan() -> GannFanArtifact {
        GannFanArtifact::new(ScenePos::new(100.0, -50.0), ScenePos::new(110.0, -60.0))
    }

    #[test]
    fn test_one_by_one_passes_through_leg() {
        let fan = fan();
        let one = GannAngle::new(1, 1);
        assert_eq!(fan.ray_end_at(&one, 110.0).unwrap(), fan.leg);
    }

    #[test]
    fn test_steeper_and_flatter_angles() {
        let fan = fan();
        let two_by_one = fan.ray_end_at(&GannAngle::new(1, 2), 110.0).unwrap();
        assert_eq!(two_by_one.y, -70.0);
        let one_by_two = fan.ray_end_at(&GannAngle::new(2, 1), 110.0).unwrap();
        assert_eq!(one_by_two.y, -55.0);
    }

    #[test]
    fn test_rays_use_enabled_defaults() {
        let mut fan = fan();
        assert_eq!(fan.rays().unwrap().len(), CHART.default_gann_angles.len());
        fan.angles[0].enabled = false;
        let rays = fan.rays().unwrap();
        assert_eq!(rays.len(), CHART.default_gann_angles.len() - 1);
        assert!(rays.iter().all(|r| r.start == fan.origin && r.end.x == fan.leg.x));
        assert!(rays.iter().any(|r| r.label == "1x1"));
    }

    #[test]
    fn test_rays_extend_past_leg() {
        let fan = fan();
        let far = fan.ray_end_at(&GannAngle::new(1, 1), 130.0).unwrap();
        assert_eq!(far, ScenePos::new(130.0, -80.0));
    }

    #[test]
    fn test_degenerate_inputs() {
        let vertical = GannFanArtifact::new(ScenePos::new(1.0, 0.0), ScenePos::new(1.0, -5.0));
        assert!(vertical.rays().is_err());
        assert!(fan().slope_for(&GannAngle::new(0, 1)).is_err());
    }
}
