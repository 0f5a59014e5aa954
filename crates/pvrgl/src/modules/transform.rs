//! Vertex transform module interface.

use glam::{Mat4, Vec3, Vec4};

/// Trait for vertex transform modules.
pub trait TransformModule {
    /// Called once per submission, before any vertex is transformed.
    fn apply_render(&mut self);

    /// Transforms an object space position into screen space. The returned `z` is the reciprocal
    /// of the clip space `w`.
    fn transform(&self, position: Vec3) -> Vec3;
}

/// A [`TransformModule`] that multiplies positions by the product of a screen, projection and
/// modelview matrix.
#[derive(Debug, Clone)]
pub struct MatrixTransform {
    pub screen: Mat4,
    pub projection: Mat4,
    pub modelview: Mat4,
    render: Mat4,
}

impl Default for MatrixTransform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

impl MatrixTransform {
    pub fn new(screen: Mat4, projection: Mat4, modelview: Mat4) -> Self {
        Self {
            screen,
            projection,
            modelview,
            render: screen * projection * modelview,
        }
    }

    /// A screen matrix mapping normalized device coordinates to a `width` by `height` viewport
    /// with the origin at the top left.
    pub fn viewport(width: f32, height: f32) -> Mat4 {
        let half_w = width / 2.0;
        let half_h = height / 2.0;

        Mat4::from_translation(Vec3::new(half_w, half_h, 0.0))
            * Mat4::from_scale(Vec3::new(half_w, -half_h, 1.0))
    }
}

impl TransformModule for MatrixTransform {
    fn apply_render(&mut self) {
        self.render = self.screen * self.projection * self.modelview;
    }

    #[inline(always)]
    fn transform(&self, position: Vec3) -> Vec3 {
        let clip = self.render * Vec4::new(position.x, position.y, position.z, 1.0);
        let inv_w = clip.w.recip();

        Vec3::new(clip.x * inv_w, clip.y * inv_w, inv_w)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_keeps_xy() {
        let xform = MatrixTransform::default();
        assert_eq!(
            xform.transform(Vec3::new(1.0, -2.0, 3.0)),
            Vec3::new(1.0, -2.0, 1.0)
        );
    }

    #[test]
    fn apply_render_picks_up_changes() {
        let mut xform = MatrixTransform::default();
        xform.modelview = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(xform.transform(Vec3::ZERO), Vec3::new(0.0, 0.0, 1.0));

        xform.apply_render();
        assert_eq!(xform.transform(Vec3::ZERO), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn perspective_divides_by_w() {
        let mut projection = Mat4::IDENTITY;
        projection.w_axis.w = 0.0;
        projection.z_axis.w = 1.0;

        let xform = MatrixTransform::new(Mat4::IDENTITY, projection, Mat4::IDENTITY);
        let out = xform.transform(Vec3::new(2.0, 4.0, 2.0));
        assert_eq!(out, Vec3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn viewport_maps_corners() {
        let xform = MatrixTransform::new(
            MatrixTransform::viewport(640.0, 480.0),
            Mat4::IDENTITY,
            Mat4::IDENTITY,
        );

        assert_eq!(
            xform.transform(Vec3::new(-1.0, 1.0, 0.0)),
            Vec3::new(0.0, 0.0, 1.0)
        );
        assert_eq!(
            xform.transform(Vec3::new(1.0, -1.0, 0.0)),
            Vec3::new(640.0, 480.0, 1.0)
        );
    }
}
