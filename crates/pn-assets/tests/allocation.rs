//! Integration tests for pn-assets.

use pn_assets::{
    AssetError, AssetRegistry, FirstEligible, NewPipe, NewStation, PipeAllocator, PipeSegment,
    eligible_pipes,
};
use pn_core::{CapacityClass, CoreError, PipeId};

fn class(mm: u32) -> CapacityClass {
    CapacityClass::from_mm(mm).unwrap()
}

#[test]
fn allocate_700_reuses_once_then_creates() {
    let mut registry = AssetRegistry::new();
    let original = registry
        .add_pipe(NewPipe {
            name: "Line 700".into(),
            length_km: 30.0,
            diameter: class(700),
        })
        .unwrap();
    let allocator = PipeAllocator::default();

    let first = allocator
        .allocate(&mut registry, class(700), &mut FirstEligible)
        .unwrap();
    assert_eq!(first.pipe, original);
    registry.mark_in_use(first.pipe).unwrap();

    let second = allocator
        .allocate(&mut registry, class(700), &mut FirstEligible)
        .unwrap();
    assert!(second.created);
    let created = registry.pipe(second.pipe).unwrap();
    assert_eq!(created.diameter, class(700));
    assert!((created.length_km() - 50.0).abs() < 1e-9);
    assert!(!created.under_repair);
    assert!(!created.is_in_use());
}

#[test]
fn repaired_pipe_becomes_eligible_again_but_used_pipe_never_does() {
    let mut registry = AssetRegistry::new();
    let a = registry
        .add_pipe(NewPipe {
            name: "A".into(),
            length_km: 1.0,
            diameter: class(500),
        })
        .unwrap();
    registry.toggle_repair(&[a]).unwrap();
    assert!(eligible_pipes(&registry, class(500)).is_empty());

    registry.toggle_repair(&[a]).unwrap();
    assert_eq!(eligible_pipes(&registry, class(500)).len(), 1);

    registry.mark_in_use(a).unwrap();
    registry.toggle_repair(&[a]).unwrap();
    registry.toggle_repair(&[a]).unwrap();
    assert!(eligible_pipes(&registry, class(500)).is_empty());
    assert_eq!(registry.remove_pipes(&[a]), Err(AssetError::PipeInUse(a)));
}

#[test]
fn station_workshops_clamp_through_registry() {
    let mut registry = AssetRegistry::new();
    let id = registry
        .add_station(NewStation {
            name: "Compressor 1".into(),
            total_workshops: 3,
            working_workshops: 3,
            class: 4,
        })
        .unwrap();

    assert_eq!(registry.adjust_working(id, 1).unwrap(), 3);
    assert_eq!(registry.adjust_working(id, -5).unwrap(), 0);
    assert_eq!(registry.adjust_working(id, -1).unwrap(), 0);
    assert_eq!(registry.station(id).unwrap().unused_percent(), 100.0);
}

#[test]
fn synthesis_fails_once_identities_run_out() {
    let loaded = PipeSegment::restore(
        PipeId::new(u32::MAX).unwrap(),
        NewPipe {
            name: "Loaded".into(),
            length_km: 1.0,
            diameter: class(700),
        },
        true,
    )
    .unwrap();
    let mut registry = AssetRegistry::from_records(vec![loaded], Vec::new()).unwrap();

    let err = PipeAllocator::default()
        .allocate(&mut registry, class(700), &mut FirstEligible)
        .unwrap_err();
    assert_eq!(err, AssetError::Core(CoreError::IdsExhausted));
    assert_eq!(registry.pipes().len(), 1);
    assert!(!registry.pipes()[0].is_in_use());
}
