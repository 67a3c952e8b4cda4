//! # Aggregate Result Tests
//!
//! Four 8-bit results in a 32-bit aggregate, filled with errors from four
//! layers of a networked application. Covers:
//!
//! - Slot placement for single results, `append` and `<<`
//! - Iteration order and the default end iterator
//! - Capacity overflow under both placement policies

use respack::prelude::*;

result_category! {
    pub struct Domain: 2;
    pub struct SubDomain: 2;
}
result_type!(pub TestResult: u8 => Domain, SubDomain);
aggregate_result_type!(pub Aggregate: u32 => TestResult);
aggregate_result_type!(pub AggregateReplaceTopmost: u32 => TestResult, ReplaceTopmost);

// ─── Fixtures ───────────────────────────────────────────────────────

mod drivers {
    use super::*;

    pub const DRIVERS: Domain = Domain(0);
    pub const ETHERNET: SubDomain = SubDomain(1);
    pub const LINK_ERROR_CODE: u8 = 3;

    pub fn eth_link_error() -> TestResult {
        TestResult::make((DRIVERS, ETHERNET), LINK_ERROR_CODE)
    }
}

mod networking {
    use super::*;

    pub const NETWORKING: Domain = Domain(1);
    pub const TCP_IP_STACK: SubDomain = SubDomain(1);
    pub const CONNECTION_ABORTED_CODE: u8 = 3;

    pub fn connection_aborted() -> TestResult {
        TestResult::make((NETWORKING, TCP_IP_STACK), CONNECTION_ABORTED_CODE)
    }
}

mod infrastructure {
    use super::*;

    pub const INFRASTRUCTURE: Domain = Domain(2);
    pub const REMOTE: SubDomain = SubDomain(1);
    pub const MESSAGE_SENDING_CODE: u8 = 1;

    pub fn message_sending_error() -> TestResult {
        TestResult::make((INFRASTRUCTURE, REMOTE), MESSAGE_SENDING_CODE)
    }
}

mod application {
    use super::*;

    pub const APPLICATION: Domain = Domain(3);
    pub const CLIENT: SubDomain = SubDomain(2);
    pub const RPC_ERROR_CODE: u8 = 1;
    pub const BACKEND_ACCESS_CODE: u8 = 2;

    pub fn rpc_client_error() -> TestResult {
        TestResult::make((APPLICATION, CLIENT), RPC_ERROR_CODE)
    }

    pub fn backend_access_error() -> TestResult {
        TestResult::make((APPLICATION, CLIENT), BACKEND_ACCESS_CODE)
    }
}

fn four_layers() -> [TestResult; 4] {
    [
        drivers::eth_link_error(),
        networking::connection_aborted(),
        infrastructure::message_sending_error(),
        application::rpc_client_error(),
    ]
}

fn assert_slot(aggregate: &impl Slots, index: usize, domain: Domain, sub: SubDomain, code: u8) {
    let r = aggregate.slot(index);
    assert_eq!(get_category::<Domain, _>(r), domain, "domain of slot {index}");
    assert_eq!(get_category::<SubDomain, _>(r), sub, "subdomain of slot {index}");
    assert_eq!(get_code(r), code, "code of slot {index}");
}

fn assert_empty_slot(aggregate: &impl Slots, index: usize) {
    assert_slot(aggregate, index, Domain(0), SubDomain(0), 0);
    assert!(is_success(aggregate.slot(index)));
}

trait Slots {
    fn slot(&self, index: usize) -> TestResult;
}

impl<P: PlacementPolicy> Slots for AggregateResult<u32, TestResult, P> {
    fn slot(&self, index: usize) -> TestResult {
        self.result_at(index)
    }
}

// ─── Construction ───────────────────────────────────────────────────

#[test]
fn test_default_is_success_and_iterates_nothing() {
    let e = Aggregate::default();
    assert!(is_aggregate_success(&e));
    assert_eq!(e.iterate_errors(), ErrorIter::default());
    assert_eq!(e.error_count(), 0);
}

#[test]
fn test_initialized_with_one_error() {
    let e = Aggregate::from(drivers::eth_link_error());

    assert_slot(&e, 0, drivers::DRIVERS, drivers::ETHERNET, drivers::LINK_ERROR_CODE);
    for index in 1..4 {
        assert_empty_slot(&e, index);
    }
}

#[test]
fn test_one_error_appended_with_second() {
    let mut e = Aggregate::from(drivers::eth_link_error());
    e.append(networking::connection_aborted());

    assert_slot(&e, 0, drivers::DRIVERS, drivers::ETHERNET, drivers::LINK_ERROR_CODE);
    assert_slot(
        &e,
        1,
        networking::NETWORKING,
        networking::TCP_IP_STACK,
        networking::CONNECTION_ABORTED_CODE,
    );
    assert_empty_slot(&e, 2);
    assert_empty_slot(&e, 3);
}

#[test]
fn test_four_errors_appended_via_shift_operator() {
    let [a, b, c, d] = four_layers();
    let e = Aggregate::new() << a << b << c << d;

    assert_slot(&e, 0, drivers::DRIVERS, drivers::ETHERNET, drivers::LINK_ERROR_CODE);
    assert_slot(
        &e,
        1,
        networking::NETWORKING,
        networking::TCP_IP_STACK,
        networking::CONNECTION_ABORTED_CODE,
    );
    assert_slot(
        &e,
        2,
        infrastructure::INFRASTRUCTURE,
        infrastructure::REMOTE,
        infrastructure::MESSAGE_SENDING_CODE,
    );
    assert_slot(
        &e,
        3,
        application::APPLICATION,
        application::CLIENT,
        application::RPC_ERROR_CODE,
    );
    assert!(e.is_full());
}

// ─── Iteration ──────────────────────────────────────────────────────

#[test]
fn test_two_errors_walked_with_explicit_iterator() {
    let e = Aggregate::from_results([drivers::eth_link_error(), networking::connection_aborted()]);
    let mut it = e.iterate_errors();
    let end = ErrorIter::default();

    assert_ne!(it, end);
    assert_eq!(it.current(), drivers::eth_link_error());

    it.advance();
    assert_ne!(it, end);
    assert_eq!(it.current(), networking::connection_aborted());

    it.advance();
    assert_eq!(it, end);
}

#[test]
fn test_four_errors_loop_via_iterator() {
    let results = four_layers();
    let e: Aggregate = results.iter().copied().collect();

    let mut seen = 0;
    for (error, expected) in e.iterate_errors().zip(results) {
        assert_eq!(get_category::<Domain, _>(error), get_category::<Domain, _>(expected));
        assert_eq!(get_category::<SubDomain, _>(error), get_category::<SubDomain, _>(expected));
        assert_eq!(get_code(error), get_code(expected));
        seen += 1;
    }
    assert_eq!(seen, 4);
    assert_eq!(e.error_count(), 4);
}

#[test]
fn test_iteration_survives_later_appends() {
    let mut e = Aggregate::from(drivers::eth_link_error());
    let snapshot = e.iterate_errors();
    e <<= networking::connection_aborted();

    assert_eq!(snapshot.count(), 1);
    assert_eq!(e.iterate_errors().count(), 2);
}

// ─── Capacity ───────────────────────────────────────────────────────

#[test]
fn test_fifth_error_is_dropped_by_default() {
    let full = Aggregate::from_results(four_layers());
    let after = full << application::backend_access_error();

    assert_eq!(after.raw(), full.raw());
    let collected: Vec<TestResult> = after.iterate_errors().collect();
    assert_eq!(collected, four_layers().to_vec());
}

#[test]
fn test_replace_topmost_overwrites_last_slot() {
    let [a, b, c, d] = four_layers();
    let mut e = AggregateReplaceTopmost::new();
    e = e << a << b << c << d;
    e <<= application::backend_access_error();

    assert_slot(&e, 0, drivers::DRIVERS, drivers::ETHERNET, drivers::LINK_ERROR_CODE);
    assert_slot(
        &e,
        1,
        networking::NETWORKING,
        networking::TCP_IP_STACK,
        networking::CONNECTION_ABORTED_CODE,
    );
    assert_slot(
        &e,
        2,
        infrastructure::INFRASTRUCTURE,
        infrastructure::REMOTE,
        infrastructure::MESSAGE_SENDING_CODE,
    );
    assert_slot(
        &e,
        3,
        application::APPLICATION,
        application::CLIENT,
        application::BACKEND_ACCESS_CODE,
    );
}

#[test]
fn test_appending_success_does_not_change_the_default_policy() {
    let e = Aggregate::from_results(four_layers()[..2].iter().copied());
    let after = e << TestResult::SUCCESS;
    assert_eq!(after, e);
}

#[test]
fn test_collect_errors_into_fixed_vector() {
    let e = Aggregate::from_results(four_layers());
    let errors: heapless::Vec<TestResult, 4> = e.collect_errors();
    assert_eq!(errors.as_slice(), &four_layers());
}
