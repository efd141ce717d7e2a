//! Benchmarks for role decoding, capability predicates, and policy checks.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mailvault_core::navigation::{active_item, menu_for, RouteGuard};
use mailvault_core::rbac::{
    can_create_organization, get_available_organization_types, OrganizationType, Permission,
    PolicyEngine, Requirement, Role, Session,
};

const ROLE_NAMES: [&str; 7] = ["admin", "distributor", "dealer", "client", "end_user", "", "superuser"];

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("role_decode");
    for name in ROLE_NAMES {
        let label = if name.is_empty() { "empty" } else { name };
        group.bench_with_input(BenchmarkId::from_parameter(label), name, |b, n| { b.iter(|| black_box(Role::decode(n))); });
    }
    group.finish();
}

fn bench_creation_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("creation_table");
    group.throughput(Throughput::Elements(25));
    group.bench_function("full_matrix", |b| {
        b.iter(|| {
            for role in Role::ALL {
                for target in OrganizationType::ALL {
                    black_box(can_create_organization(role, target));
                }
                black_box(can_create_organization(role, OrganizationType::Unknown));
            }
        });
    });
    group.bench_function("available_types", |b| { b.iter(|| { for role in Role::ALL { black_box(get_available_organization_types(role)); } }); });
    group.finish();
}

fn bench_policy_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_check");
    let engine = PolicyEngine::new();
    let session = Session::new("bench", Role::Dealer).with_organization("org", OrganizationType::Dealer);
    let requirements = [
        ("min_level", Requirement::MinLevel(3)),
        ("role", Requirement::Role(Role::Dealer)),
        ("any_role", Requirement::AnyRole(vec![Role::Distributor, Role::Dealer])),
        ("permission", Requirement::Permission(Permission::new("clients", "create"))),
        ("org_type", Requirement::OrganizationType(OrganizationType::Dealer)),
    ];
    for (label, requirement) in &requirements {
        group.bench_with_input(BenchmarkId::from_parameter(label), requirement, |b, r| { b.iter(|| black_box(engine.check(&session, r))); });
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    let guard = RouteGuard::default();
    let session = Session::new("bench", Role::EndUser);
    group.bench_function("guard_allow", |b| { b.iter(|| black_box(guard.evaluate(Some(&session), "/emails", &[Role::EndUser]))); });
    group.bench_function("menu_end_user", |b| { b.iter(|| black_box(menu_for(Role::EndUser))); });
    group.bench_function("active_item_folder", |b| { b.iter(|| black_box(active_item(Role::EndUser, "/emails?folder=Sent%20Items"))); });
    group.finish();
}

criterion_group!(benches, bench_decode, bench_creation_table, bench_policy_check, bench_navigation);
criterion_main!(benches);
