// ─────────────────────────────────────────────────────────────────────
// Corelat — Property-Based Tests (proptest) for corelat-types
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! Covers: layout schema roundtrip, validation invariants, config
//! serialization roundtrip.

use corelat_types::config::CoreConfig;
use corelat_types::error::CoreError;
use corelat_types::layout::{CellDetail, CellSpec, LayoutSpec};
use proptest::prelude::*;

fn arb_cell_spec() -> impl Strategy<Value = CellSpec> {
    prop_oneof![
        prop_oneof![
            Just("Fuel".to_string()),
            Just("Moderator".to_string()),
            Just("ControlRod".to_string()),
            Just("Blank".to_string()),
        ]
        .prop_map(CellSpec::Name),
        (0.02f64..0.045, 0.0f64..=1.0).prop_map(|(e, l)| {
            CellSpec::Detailed(CellDetail {
                fa_type: "Fuel".to_string(),
                enrichment: Some(e),
                life: Some(l),
            })
        }),
    ]
}

fn arb_layout(max_side: usize) -> impl Strategy<Value = LayoutSpec> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(arb_cell_spec(), w), h)
            .prop_map(move |grid| LayoutSpec {
                width: w,
                height: h,
                grid,
            })
    })
}

proptest! {
    /// A well-formed layout always validates.
    #[test]
    fn layout_validates(layout in arb_layout(8)) {
        prop_assert!(layout.validate().is_ok());
    }

    /// Layout JSON roundtrip preserves shape and every cell kind.
    #[test]
    fn layout_json_roundtrip(layout in arb_layout(6)) {
        let json = serde_json::to_string(&layout).unwrap();
        let back: LayoutSpec = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.width, layout.width);
        prop_assert_eq!(back.height, layout.height);
        for (row_a, row_b) in layout.grid.iter().zip(back.grid.iter()) {
            for (a, b) in row_a.iter().zip(row_b.iter()) {
                prop_assert_eq!(a.kind().unwrap(), b.kind().unwrap());
            }
        }
    }

    /// A truncated grid is rejected with a shape error.
    #[test]
    fn truncated_layout_rejected(layout in arb_layout(6)) {
        prop_assume!(layout.height > 1);
        let mut broken = layout;
        broken.grid.pop();
        prop_assert!(
            matches!(broken.validate(), Err(CoreError::LayoutShape { .. })),
            "truncated grid must fail with a shape error"
        );
    }

    /// Any unknown type name anywhere in the grid fails validation.
    #[test]
    fn unknown_name_rejected(
        layout in arb_layout(5),
        name in "[a-z]{3,10}",
    ) {
        prop_assume!(name.parse::<corelat_types::layout::AssemblyKind>().is_err());
        let mut broken = layout;
        broken.grid[0][0] = CellSpec::Name(name);
        prop_assert!(
            matches!(broken.validate(), Err(CoreError::UnknownAssemblyType { .. })),
            "unknown type name must fail validation"
        );
    }
}

proptest! {
    /// Config survives a JSON roundtrip for arbitrary step counts and
    /// overridden thresholds.
    #[test]
    fn config_roundtrip(steps in 1usize..10_000, limit in 400.0f64..1000.0) {
        let mut cfg = CoreConfig::default();
        cfg.steps = steps;
        cfg.scoring.temp_limit = limit;
        let json = serde_json::to_string(&cfg).unwrap();
        let back: CoreConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.steps, steps);
        prop_assert!((back.scoring.temp_limit - limit).abs() < 1e-12);
    }
}
