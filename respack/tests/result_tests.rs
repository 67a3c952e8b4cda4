//! # Result Code Tests
//!
//! Single results declared both by hand (`CategoryValue` with marker types)
//! and through the declaration macros, checked against the runtime layout
//! descriptor.

use respack::layout::{CategoryList, RuntimeLayout};
use respack::prelude::*;

// ─── Manual declaration ─────────────────────────────────────────────

enum TestDomain {}
enum TestSubDomain {}

type DomainId = CategoryValue<TestDomain, 2>;
type SubDomainId = CategoryValue<TestSubDomain, 3>;
type ManualResult = ResultCode<u8, (DomainId, SubDomainId)>;

#[test]
fn test_manual_declaration_8_bit_width() {
    let r = ManualResult::from_raw(0b01111101);

    assert_eq!(get_category::<DomainId, _>(r).value(), 0b01);
    assert_eq!(get_category::<SubDomainId, _>(r).value(), 0b111);
    assert_eq!(get_code(r), 0b101);
}

// ─── Macro declaration ──────────────────────────────────────────────

result_category! {
    pub struct Category: 2;
    pub struct SubCategory: 2;
}
result_type!(pub Result8: u8 => Category, SubCategory);

result_category! {
    pub struct Vendor: 12;
    pub struct Device: 8;
    pub struct Channel: 4;
}
result_type!(pub Result32: u32 => Vendor, Device, Channel);

#[test]
fn test_make_packs_msb_first() {
    let r = Result8::make((Category(1), SubCategory(2)), 5);
    assert_eq!(r.raw(), 0b01_10_0101);
    assert!(!is_success(r));
}

#[test]
fn test_success_constant() {
    assert!(is_success(Result8::SUCCESS));
    assert_eq!(Result8::default(), Result8::SUCCESS);
    assert_eq!(Result8::make((Category(0), SubCategory(0)), 0), Result8::SUCCESS);
}

#[test]
fn test_every_field_round_trips_independently() {
    assert_eq!(Result32::CODE_WIDTH, 8);

    let r = Result32::make((Vendor(0xABC), Device(0x5A), Channel(0x9)), 0xFF);
    assert_eq!(r.category::<Vendor, _>(), 0xABC);
    assert_eq!(r.category::<Device, _>(), 0x5A);
    assert_eq!(r.category::<Channel, _>(), 0x9);
    assert_eq!(r.code(), 0xFF);

    let r = Result32::make((Vendor(0), Device(0xFF), Channel(0)), 0);
    assert_eq!(r.category::<Vendor, _>(), 0);
    assert_eq!(r.category::<Device, _>(), 0xFF);
    assert_eq!(r.category::<Channel, _>(), 0);
    assert_eq!(r.code(), 0);
}

#[test]
fn test_truncation_never_bleeds_into_neighbours() {
    let r = Result32::make((Vendor(0xFFFF), Device(0x1FF), Channel(0x1F)), 0xFFFF_FFFF);
    assert_eq!(r.raw(), 0xFFFF_FFFF);
    let r = Result32::make((Vendor(0), Device(0x100), Channel(0)), 0);
    assert!(is_success(r));
}

// ─── Runtime layout agreement ───────────────────────────────────────

#[test]
fn test_runtime_layout_agrees_with_static_layout() {
    let layout = RuntimeLayout::of::<u32, (Vendor, Device, Channel)>().expect("valid layout");
    assert_eq!(layout.category_bits(), <(Vendor, Device, Channel) as CategoryList>::TOTAL_WIDTH);
    assert_eq!(layout.code().width, Result32::CODE_WIDTH);

    let r = Result32::make((Vendor(0x123), Device(0x45), Channel(0x6)), 0x89);
    let decoded = layout.decode(u128::from(r.raw()));
    assert_eq!(decoded.categories.as_slice(), &[0x123, 0x45, 0x6]);
    assert_eq!(decoded.code, 0x89);

    let encoded = layout.encode(&[0x123, 0x45, 0x6], 0x89).expect("three categories");
    assert_eq!(encoded, u128::from(r.raw()));
}

#[test]
fn test_runtime_layout_rejects_bad_descriptors() {
    assert_eq!(
        RuntimeLayout::new(8, &[4, 5]),
        Err(LayoutError::CategoriesTooWide { total: 9, storage: 8 })
    );
    assert_eq!(RuntimeLayout::new(12, &[2]), Err(LayoutError::UnsupportedStorage(12)));
    assert_eq!(RuntimeLayout::new(8, &[]), Err(LayoutError::NoCategories));
}
