//! End-to-end tests for the shading composer.

use glam::{Mat4, Vec3, Vec4};
use shade_core::shadow::{ConstantDepth, DepthMap};
use shade_core::{
    AddressMode, CompareFilter, ComparisonSampler, DirectionalLight, Falloff, Fragment, Light,
    MaterialConstants, PassConstants, PointLight, ShadingComposer,
};

const SAMPLER: ComparisonSampler = ComparisonSampler::new(CompareFilter::Linear, AddressMode::Clamp);
const OPEN: ConstantDepth = ConstantDepth::new(32, 32, 1.0);
const BLOCKED: ConstantDepth = ConstantDepth::new(32, 32, 0.0);

fn sun() -> Light {
    DirectionalLight {
        strength: Vec3::ONE,
        direction: Vec3::NEG_Y,
    }
    .into()
}

fn pass(light: Light) -> PassConstants {
    PassConstants::with_light(
        Vec3::new(0.0, 5.0, 0.0),
        Vec4::new(0.25, 0.25, 0.25, 1.0),
        light,
    )
}

fn material() -> MaterialConstants {
    MaterialConstants {
        diffuse_albedo: Vec4::ONE,
        fresnel_r0: Vec3::splat(0.05),
        roughness: 0.5,
        mat_transform: Mat4::IDENTITY,
    }
}

fn fragment() -> Fragment {
    Fragment {
        world_pos: Vec3::ZERO,
        normal: Vec3::Y,
        shadow_pos: Vec4::new(0.5, 0.5, 0.5, 1.0),
    }
}

// --- Tests ---

mod composition {
    use super::*;

    #[test]
    fn lit_surface_exceeds_ambient_baseline() {
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let color = composer.shade(&fragment(), &pass(sun()), &material(), Vec4::ONE);

        assert_eq!(composer.visibility(&fragment()), 1.0);
        assert!(color.x > 0.25 && color.y > 0.25 && color.z > 0.25, "{:?}", color);
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn fully_shadowed_is_ambient_only() {
        let composer = ShadingComposer::new(&BLOCKED, SAMPLER);
        let base = Vec4::new(0.8, 0.4, 0.2, 1.0);
        let color = composer.shade(&fragment(), &pass(sun()), &material(), base);

        assert_eq!(composer.visibility(&fragment()), 0.0);
        assert_eq!(color.truncate(), base.truncate() * 0.25);
    }

    #[test]
    fn combined_call_matches_separate_calls() {
        // Left half occluded so the fragment lands in a penumbra.
        let texels: Vec<u16> = (0..16).map(|i| if i % 4 < 2 { 0 } else { u16::MAX }).collect();
        let map = DepthMap::new(4, 4, &texels).unwrap();
        let composer = ShadingComposer::new(&map, SAMPLER);
        let base = Vec4::new(0.6, 0.7, 0.8, 1.0);

        let (color, visibility) =
            composer.shade_with_visibility(&fragment(), &pass(sun()), &material(), base);

        assert!(visibility > 0.0 && visibility < 1.0, "visibility={}", visibility);
        assert_eq!(visibility, composer.visibility(&fragment()));
        assert_eq!(color, composer.shade(&fragment(), &pass(sun()), &material(), base));
    }

    #[test]
    fn alpha_comes_from_diffuse() {
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let mut mat = material();
        mat.diffuse_albedo = Vec4::new(1.0, 1.0, 1.0, 0.5);
        let color = composer.shade(&fragment(), &pass(sun()), &mat, Vec4::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(color.w, 0.25);
    }

    #[test]
    fn base_color_modulates_channels() {
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let mut mat = material();
        mat.fresnel_r0 = Vec3::ZERO;
        let color = composer.shade(
            &fragment(),
            &pass(sun()),
            &mat,
            Vec4::new(0.5, 1.0, 1.0, 1.0),
        );
        // Red is scaled twice by the half-strength base color: once as the
        // diffuse term and once in the final modulation.
        assert!(color.x < color.y, "{:?}", color);
        assert!((color.y - color.z).abs() < 1e-6);
    }

    #[test]
    fn roughness_inverts_to_shininess() {
        let mat = MaterialConstants {
            roughness: 0.2,
            ..material()
        };
        let m = mat.material(Vec4::ONE);
        assert!((m.shininess - 0.8).abs() < 1e-6);
        assert_eq!(m.fresnel_r0, mat.fresnel_r0);
    }
}

mod degenerate_inputs {
    use super::*;

    #[test]
    fn unnormalized_normal_is_renormalized() {
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let unit = composer.shade(&fragment(), &pass(sun()), &material(), Vec4::ONE);
        let long = Fragment {
            normal: Vec3::new(0.0, 7.5, 0.0),
            ..fragment()
        };
        let scaled = composer.shade(&long, &pass(sun()), &material(), Vec4::ONE);
        assert!((unit - scaled).abs().max_element() < 1e-6);
    }

    #[test]
    fn zero_normal_stays_finite() {
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let frag = Fragment {
            normal: Vec3::ZERO,
            ..fragment()
        };
        let color = composer.shade(&frag, &pass(sun()), &material(), Vec4::ONE);
        assert!(color.is_finite());
    }

    #[test]
    fn eye_on_surface_stays_finite() {
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let mut p = pass(sun());
        p.eye_pos = fragment().world_pos;
        let color = composer.shade(&fragment(), &p, &material(), Vec4::ONE);
        assert!(color.is_finite());
        assert!(color.x > 0.25);
    }

    #[test]
    fn fragment_behind_shadow_projection_is_lit() {
        let composer = ShadingComposer::new(&BLOCKED, SAMPLER);
        let frag = Fragment {
            shadow_pos: Vec4::new(0.5, 0.5, 0.5, -1.0),
            ..fragment()
        };
        assert_eq!(composer.visibility(&frag), 1.0);
    }
}

mod multiple_lights {
    use super::*;

    #[test]
    fn only_first_light_is_shadowed() {
        let fill: Light = PointLight {
            strength: Vec3::splat(0.5),
            position: Vec3::new(0.0, 2.0, 0.0),
            falloff: Falloff::new(1.0, 10.0),
        }
        .into();

        let mut p = pass(sun());
        p.lights.push(fill).unwrap();

        let composer = ShadingComposer::new(&BLOCKED, SAMPLER);
        let color = composer.shade(&fragment(), &p, &material(), Vec4::ONE);

        let frag = fragment();
        let to_eye = (p.eye_pos - frag.world_pos).normalize();
        let fill_only = fill.evaluate(
            &material().material(Vec4::ONE),
            frag.world_pos,
            frag.normal,
            to_eye,
        );
        let expected = Vec3::splat(0.25) + fill_only;
        assert!((color.truncate() - expected).abs().max_element() < 1e-5);
    }

    #[test]
    fn with_light_holds_exactly_that_light() {
        let p = pass(sun());
        assert_eq!(p.lights.len(), 1);
        assert_eq!(p.lights[0], sun());
        assert_eq!(p.shadow_transform, Mat4::IDENTITY);
    }

    #[test]
    fn unlit_pass_is_ambient() {
        let mut p = pass(sun());
        p.lights.clear();
        let composer = ShadingComposer::new(&OPEN, SAMPLER);
        let color = composer.shade(&fragment(), &p, &material(), Vec4::ONE);
        assert_eq!(color, Vec4::new(0.25, 0.25, 0.25, 1.0));
    }
}
