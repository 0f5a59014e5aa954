//! Lighting module interface.

use color::Rgba;
use glam::{Vec3, Vec4};

/// Maximum number of lights.
pub const MAX_LIGHTS: usize = 8;

/// Trait for lighting modules.
pub trait LightingModule {
    /// Whether lighting is enabled at all.
    fn enabled(&self) -> bool;

    fn light_enabled(&self, index: usize) -> bool;

    /// Color contributed by light `index` to a vertex at `position` with `normal`.
    fn contribution(&self, index: usize, position: Vec3, normal: Vec3) -> Rgba;
}

/// An implementation of [`LightingModule`] with lighting disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopLightingModule;

impl LightingModule for NopLightingModule {
    fn enabled(&self) -> bool {
        false
    }

    fn light_enabled(&self, _: usize) -> bool {
        false
    }

    fn contribution(&self, _: usize, _: Vec3, _: Vec3) -> Rgba {
        Rgba::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub ambient: Rgba,
    pub diffuse: Rgba,
    /// Position for `w == 1`, direction towards the light for `w == 0`.
    pub position: Vec4,
    /// Constant, linear and quadratic distance attenuation.
    pub dist_attenuation: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient: Rgba::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Rgba::WHITE,
            position: Vec4::new(0.0, 0.0, 1.0, 0.0),
            dist_attenuation: Vec3::new(1.0, 0.0, 0.0),
        }
    }
}

impl Light {
    #[inline(always)]
    pub fn is_positional(&self) -> bool {
        self.position.w != 0.0
    }

    fn contribution(&self, material: &Material, position: Vec3, normal: Vec3) -> Rgba {
        let (to_light, attenuation) = if self.is_positional() {
            let delta = self.position.truncate() - position;
            let dist = delta.length();
            let [k0, k1, k2] = self.dist_attenuation.to_array();
            let factor = k0 + k1 * dist + k2 * dist * dist;

            (delta.normalize_or_zero(), if factor > 0.0 { factor.recip() } else { 1.0 })
        } else {
            (self.position.truncate().normalize_or_zero(), 1.0)
        };

        let lambert = normal.dot(to_light).max(0.0);
        let ambient = self.ambient.modulate(material.ambient);
        let diffuse = self.diffuse.modulate(material.diffuse).scale(lambert);

        let lit = (ambient + diffuse).scale(attenuation);
        Rgba::new(lit.r, lit.g, lit.b, material.diffuse.a)
    }
}

/// Surface reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Rgba,
    pub diffuse: Rgba,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Rgba::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Rgba::new(0.8, 0.8, 0.8, 1.0),
        }
    }
}

/// A [`LightingModule`] with fixed-function ambient and diffuse lights.
#[derive(Debug, Clone, Default)]
pub struct FixedLighting {
    pub enabled: bool,
    pub material: Material,
    pub lights: [Option<Light>; MAX_LIGHTS],
}

impl LightingModule for FixedLighting {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn light_enabled(&self, index: usize) -> bool {
        self.lights.get(index).is_some_and(Option::is_some)
    }

    fn contribution(&self, index: usize, position: Vec3, normal: Vec3) -> Rgba {
        match self.lights.get(index).copied().flatten() {
            Some(light) => light.contribution(&self.material, position, normal),
            None => Rgba::new(0.0, 0.0, 0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn white_material() -> Material {
        Material {
            ambient: Rgba::WHITE,
            diffuse: Rgba::WHITE,
        }
    }

    #[test]
    fn directional_lambert() {
        let light = Light {
            ambient: Rgba::new(0.0, 0.0, 0.0, 0.0),
            diffuse: Rgba::WHITE,
            position: Vec4::new(0.0, 0.0, 1.0, 0.0),
            ..Default::default()
        };

        let facing = light.contribution(&white_material(), Vec3::ZERO, Vec3::Z);
        assert_eq!(facing, Rgba::WHITE);

        let away = light.contribution(&white_material(), Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(away, Rgba::BLACK);
    }

    #[test]
    fn positional_attenuation() {
        let light = Light {
            ambient: Rgba::new(0.0, 0.0, 0.0, 0.0),
            diffuse: Rgba::WHITE,
            position: Vec4::new(0.0, 0.0, 2.0, 1.0),
            dist_attenuation: Vec3::new(0.0, 0.0, 1.0),
        };

        let out = light.contribution(&white_material(), Vec3::ZERO, Vec3::Z);
        assert_eq!(out, Rgba::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn fixed_lighting_slots() {
        let mut lighting = FixedLighting {
            enabled: true,
            ..Default::default()
        };
        lighting.lights[3] = Some(Light::default());

        assert!(lighting.light_enabled(3));
        assert!(!lighting.light_enabled(0));
        assert!(!lighting.light_enabled(MAX_LIGHTS));
        assert_eq!(
            lighting.contribution(0, Vec3::ZERO, Vec3::Z),
            Rgba::new(0.0, 0.0, 0.0, 0.0)
        );

        // default light sits towards +z
        let out = lighting.contribution(3, Vec3::ZERO, Vec3::Z);
        assert_eq!(out, Rgba::new(0.8, 0.8, 0.8, 1.0));
    }
}
