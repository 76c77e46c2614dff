//! API Regression Tests for the Pipe Crate Ecosystem
//!
//! These tests serve as a regression suite to ensure the public API remains
//! stable and consistent across the pipe crate ecosystem. They are organized
//! in 4 tiers of increasing complexity:
//!
//! - Tier 1: Specification (pipe-spec tables, lookup, records)
//! - Tier 2: Geometry (pipe-geometry solids, anchors, kernels)
//! - Tier 3: Fittings (pipe-fittings endpoints, components, assemblers)
//! - Tier 4: Assembly (pipe-assembly joins and bill of materials)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use nalgebra::Vector3;
use pipe::{fittings, geometry, prelude::*, spec};

fn dn20() -> PipeSpec {
    SpecQuery::new(40).dn("DN20").find().unwrap()
}

// =============================================================================
// TIER 1: Specification - Tables, Lookup, Records
// =============================================================================

mod tier1_specification {
    use super::*;
    use pipe::spec::{Selector, SpecField, specs_for, table};

    #[test]
    fn dn20_schedule_40_lookup() {
        let spec = lookup(40, &[Selector::Dn("DN20".into())]).unwrap();
        assert_eq!(spec.od(), 26.7);
        assert_eq!(spec.wall(), 2.87);
        assert_eq!(spec.name(), "3/4");
        assert_relative_eq!(spec.thread_length(), 13.86078, epsilon = 1e-9);
        assert_relative_eq!(spec.thread_pitch(), 1.814322, epsilon = 1e-9);
    }

    #[test]
    fn schedule_120_has_no_eighth_inch() {
        let err = SpecQuery::new(120).name("1/8").find().unwrap_err();
        assert!(matches!(err, SpecError::NoMatch { .. }));
    }

    #[test]
    fn shared_wall_is_ambiguous() {
        // Sch40 1/4" and 3/8" share a 2.4 mm wall
        let err = SpecQuery::new(40).wall(2.4).find().unwrap_err();
        assert!(matches!(err, SpecError::AmbiguousMatch { count: 2, .. }));
    }

    #[test]
    fn unknown_schedule_and_missing_selector() {
        let err = SpecQuery::new(30).name("1").find().unwrap_err();
        assert!(matches!(err, SpecError::InvalidSchedule { .. }));

        let err = SpecQuery::new(40).find().unwrap_err();
        assert!(matches!(err, SpecError::MissingSelector { .. }));
    }

    #[test]
    fn every_unique_name_resolves_to_its_record() {
        for schedule in Schedule::ALL {
            for record in specs_for(schedule) {
                let found = SpecQuery::for_schedule(schedule)
                    .name(record.name())
                    .find()
                    .unwrap();
                assert_eq!(&found, record);
            }
        }
    }

    #[test]
    fn inner_diameter_is_positive_and_below_od() {
        for record in table() {
            let id = record.inner_diameter();
            assert!(id > 0.0 && id < record.od(), "{}", record.label());
        }
    }

    #[test]
    fn copy_on_write_updates_one_field() {
        let spec = dn20();
        let thick = spec.with_wall(3.91);
        assert_eq!(thick.wall(), 3.91);
        assert_eq!(thick.od(), spec.od());
        assert_eq!(thick.name(), spec.name());
        assert_eq!(spec.wall(), 2.87);
        assert_eq!(
            thick.get(SpecField::Wall).as_number(),
            Some(3.91)
        );
    }
}

// =============================================================================
// TIER 2: Geometry - Solids, Anchors, Kernels
// =============================================================================

mod tier2_geometry {
    use super::*;
    use geometry::{Point3, mate};

    #[test]
    fn solid_builders_and_bounds() {
        let tube = Solid::tube(10.0, 20.0, 16.0);
        let bounds = tube.bounds();
        assert_relative_eq!(bounds.max.z, 10.0);
        assert_relative_eq!(bounds.max.x, 10.0);

        let cut = Solid::cylinder(5.0, 30.0).difference(Solid::cylinder(5.0, 10.0));
        assert_relative_eq!(cut.bounds().max.x, 15.0);
        assert!(Solid::Empty.bounds().is_empty());
    }

    #[test]
    fn anchors_mate_face_to_face() {
        let target = Anchor::new("B", Point3::new(0.0, 0.0, 50.0), Vector3::z());
        let child = Anchor::new("A", Point3::new(0.0, 0.0, -10.0), -Vector3::z());
        let moved = child.transformed(&mate(&child, &target));
        assert!(moved.faces(&target, 1e-9));
    }

    #[test]
    fn scad_writer_renders_primitives() {
        let scad = ScadWriter::new(32).render(&Solid::sphere(8.0)).unwrap();
        assert!(scad.contains("$fn = 32;"));
        assert!(scad.contains("sphere(d = 8);"));
    }
}

// =============================================================================
// TIER 3: Fittings - Endpoints, Components, Assemblers
// =============================================================================

mod tier3_fittings {
    use super::*;
    use fittings::{PartComponent, endpoint};

    #[test]
    fn endpoint_names_parse() {
        assert_eq!("MIPT".parse::<EndpointType>().unwrap(), EndpointType::MaleThread);
        assert_eq!("fipt".parse::<EndpointType>().unwrap(), EndpointType::FemaleThread);
        assert_eq!("inner-spigot".parse::<EndpointType>().unwrap(), EndpointType::InnerSpigot);
        assert!("flare".parse::<EndpointType>().is_err());
    }

    #[test]
    fn endpoint_defaults_to_thread_length() {
        let spec = dn20();
        let geometry = endpoint(&spec, EndpointType::Socket, None, &FittingConfig::default()).unwrap();
        assert_relative_eq!(geometry.length, spec.thread_length());
        assert!(geometry.anchor("face").is_some());

        let err = endpoint(&spec, EndpointType::Socket, Some(-1.0), &FittingConfig::default()).unwrap_err();
        assert!(matches!(err, FittingError::NegativeLength { .. }));
    }

    #[test]
    fn component_orients_by_join_anchor() {
        let component = PartComponent::new(&dn20(), EndpointType::Spigot, Some(20.0), &FittingConfig::default())
            .unwrap()
            .oriented("right")
            .unwrap();
        assert_relative_eq!(component.tip().direction(), Vector3::x(), epsilon = 1e-9);
        assert!(component.clone().oriented("sideways").is_err());
    }

    #[test]
    fn bushing_with_equal_od_is_incompatible() {
        let sch40 = SpecQuery::new(40).dn("DN50").find().unwrap();
        let sch80 = SpecQuery::new(80).dn("DN50").find().unwrap();
        let err = bushing(&sch40, &sch80, &[], &FittingParams::default(), &FittingConfig::default()).unwrap_err();
        assert!(matches!(err, FittingError::IncompatibleSizes { .. }));
    }

    #[test]
    fn cap_rejects_spigot() {
        let err = cap(
            &dn20(),
            &[Some(EndpointType::Spigot)],
            &FittingParams::default(),
            &FittingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FittingError::InvalidEndpointForPart { .. }));
        assert!(err.is_end_error());
    }

    #[test]
    fn stubs_are_not_supported() {
        for kind in [FittingKind::SideOutletElbow, FittingKind::Saddle, FittingKind::Union] {
            let err = build_fitting(
                kind,
                &dn20(),
                None,
                &[],
                &FittingParams::default(),
                &FittingConfig::default(),
            )
            .unwrap_err();
            assert!(matches!(err, FittingError::NotSupported { .. }), "{kind}");
        }
    }

    #[test]
    fn anchor_counts_per_kind() {
        let config = FittingConfig::preview();
        let expected = [
            (FittingKind::Pipe, 2),
            (FittingKind::Coupling, 2),
            (FittingKind::Elbow, 2),
            (FittingKind::Tee, 3),
            (FittingKind::Wye, 3),
            (FittingKind::Cross, 4),
            (FittingKind::Corner, 3),
            (FittingKind::SideOutletTee, 4),
            (FittingKind::SixWay, 6),
            (FittingKind::Cap, 1),
            (FittingKind::Plug, 1),
            (FittingKind::Flange, 2),
        ];
        for (kind, anchors) in expected {
            let model = FittingRequest::new(kind, SpecQuery::new(40).dn("DN20"))
                .build(&config)
                .unwrap();
            assert_eq!(model.anchors().len(), anchors, "{kind}");
        }
    }

    #[test]
    fn config_presets() {
        let preview = FittingConfig::preview();
        assert!(!preview.thread_bevel);
        assert!(FittingConfig::print().segments > FittingConfig::default().segments);
    }

    #[test]
    fn batch_builds_independently() {
        let requests = vec![
            FittingRequest::new(FittingKind::Tee, SpecQuery::new(40).dn("DN20")),
            FittingRequest::new(FittingKind::Tee, SpecQuery::new(120).name("1/8")),
            FittingRequest::new(FittingKind::Adapter, SpecQuery::new(40).dn("DN25"))
                .with_second(SpecQuery::new(40).dn("DN20")),
        ];
        let results = build_all(&requests, &FittingConfig::default());
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_spec_error());
        assert!(results[2].is_ok());
    }
}

// =============================================================================
// TIER 4: Assembly - Joins and Bill of Materials
// =============================================================================

mod tier4_assembly {
    use super::*;

    #[test]
    fn tee_with_pipes_and_caps() {
        let spec = dn20();
        let params = FittingParams::default();
        let config = FittingConfig::default();
        let spigots = [Some(EndpointType::Spigot), Some(EndpointType::Spigot)];

        let mut assembly = Assembly::new("manifold");
        assembly.add("tee", tee(&spec, &[], &params, &config).unwrap()).unwrap();
        for (i, anchor) in ["A", "B", "C"].into_iter().enumerate() {
            let run = format!("run{i}");
            let end = format!("cap{i}");
            assembly
                .attach(run.as_str(), pipe(&spec, &spigots, &params, &config).unwrap(), "A", "tee", anchor)
                .unwrap();
            assembly
                .attach(end.as_str(), cap(&spec, &[], &params, &config).unwrap(), "A", &run, "B")
                .unwrap();
        }

        assert!(assembly.open_ports().is_empty());
        let bom = assembly.bom();
        assert_eq!(bom.total_parts(), 7);
        assert_eq!(bom.get(FittingKind::Pipe, &spec.label()).unwrap().quantity, 3);
        assert_eq!(bom.get(FittingKind::Cap, &spec.label()).unwrap().quantity, 3);
    }

    #[test]
    fn threads_do_not_go_into_sockets() {
        let spec = dn20();
        let params = FittingParams::default();
        let config = FittingConfig::default();

        let mut assembly = Assembly::new("bad");
        assembly.add("elbow", elbow(&spec, &[], &params, &config).unwrap()).unwrap();
        let err = assembly
            .attach("n", nipple(&spec, &[], &params, &config).unwrap(), "A", "elbow", "B")
            .unwrap_err();
        assert!(matches!(err, AssemblyError::IncompatibleConnection { .. }));
    }
}

// =============================================================================
// Error Handling
// =============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn spec_errors_convert_into_fitting_errors() {
        let err: FittingError = SpecQuery::new(40).find().unwrap_err().into();
        assert!(err.is_spec_error());
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = "union-joint".parse::<FittingKind>().unwrap_err();
        assert!(matches!(err, FittingError::UnknownFittingKind { .. }));
        assert!(err.to_string().contains("union-joint"));

        let err = spec::Schedule::from_number(30).unwrap_err();
        assert!(matches!(err, SpecError::InvalidSchedule { .. }));
    }

    #[test]
    fn overridden_spec_without_bore_is_rejected() {
        let params = FittingParams::default();
        let config = FittingConfig::default();
        for bad in [dn20().with_wall(13.35), dn20().with_wall(20.0), dn20().with_od(0.0)] {
            for kind in [FittingKind::Pipe, FittingKind::Tee, FittingKind::Cap, FittingKind::Flange] {
                let err = build_fitting(kind, &bad, None, &[], &params, &config).unwrap_err();
                assert!(
                    matches!(err, FittingError::Spec(SpecError::InvalidDimensions { .. })),
                    "{kind}: {err}"
                );
            }
        }
    }

    #[test]
    fn non_finite_lengths_are_rejected() {
        let config = FittingConfig::default();
        for bad in [f64::NAN, f64::INFINITY] {
            let params = FittingParams::default().with_length(bad);
            assert!(pipe(&dn20(), &[], &params, &config).is_err());
            assert!(flange(&dn20(), &[], &params, &config).is_err());
        }
        let params = FittingParams::default().with_length(-5.0);
        let err = pipe(&dn20(), &[], &params, &config).unwrap_err();
        assert!(matches!(err, FittingError::NegativeLength { .. }));
    }

    #[test]
    fn sharp_return_elbow_is_rejected() {
        let config = FittingConfig::default();
        let sharp = FittingParams::default().with_angle(180.0);
        assert!(elbow(&dn20(), &[], &sharp, &config).is_err());
        let swept = sharp.with_bend_radius(50.0);
        let model = elbow(&dn20(), &[], &swept, &config).unwrap();
        let a = model.anchor("A").unwrap().position();
        let b = model.anchor("B").unwrap().position();
        assert_relative_eq!((b - a).norm(), 100.0, epsilon = 1e-9);
    }
}
