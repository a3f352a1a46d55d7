use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use radius_codec::{
    deobfuscate, generate_authenticator, obfuscate, Attribute, AttributeType, Code, Dictionary,
    Packet,
};
use std::sync::Arc;

const SECRET: &[u8] = b"testing123";

fn create_test_packet(dictionary: &Arc<Dictionary>, num_attributes: usize) -> Packet {
    let req_auth = generate_authenticator().expect("Failed to generate authenticator");
    let mut packet = Packet::new(Code::AccessRequest, 1, req_auth, Arc::clone(dictionary));

    packet
        .add_attribute("User-Name", "testuser")
        .expect("Failed to add User-Name");
    packet
        .add_attribute("User-Password", "testpassword")
        .expect("Failed to add User-Password");

    // Add additional attributes to test scaling
    for i in 0..num_attributes {
        packet
            .add_attribute("Reply-Message", format!("attribute_{}", i))
            .expect("Failed to add Reply-Message");
    }

    packet
}

fn bench_packet_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_encode");
    let dictionary = Arc::new(Dictionary::standard());

    for num_attrs in [0, 5, 10, 20].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_attrs),
            num_attrs,
            |b, &num_attrs| {
                let packet = create_test_packet(&dictionary, num_attrs);
                b.iter(|| packet.encode(black_box(SECRET)).expect("Failed to encode packet"));
            },
        );
    }

    group.finish();
}

fn bench_packet_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_decode");
    let dictionary = Arc::new(Dictionary::standard());

    for num_attrs in [0, 5, 10, 20].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_attrs),
            num_attrs,
            |b, &num_attrs| {
                let packet = create_test_packet(&dictionary, num_attrs);
                let encoded = packet.encode(SECRET).expect("Failed to encode");
                b.iter(|| {
                    Packet::decode(black_box(&encoded), SECRET, Arc::clone(&dictionary))
                        .expect("Failed to decode packet")
                });
            },
        );
    }

    group.finish();
}

fn bench_password_obfuscation(c: &mut Criterion) {
    let mut group = c.benchmark_group("password_obfuscation");

    let passwords = vec![
        ("short", "test"),
        ("block", "testpassword1234"),
        ("long", "this_is_a_very_long_password_to_test_performance"),
    ];

    for (name, password) in passwords.iter() {
        let req_auth = generate_authenticator().expect("Failed to generate authenticator");

        group.bench_with_input(BenchmarkId::new("obfuscate", name), password, |b, &password| {
            b.iter(|| obfuscate(black_box(SECRET), black_box(&req_auth), black_box(password.as_bytes())));
        });

        let hidden = obfuscate(SECRET, &req_auth, password.as_bytes());
        group.bench_with_input(BenchmarkId::new("deobfuscate", name), &hidden, |b, hidden| {
            b.iter(|| deobfuscate(black_box(SECRET), black_box(hidden), black_box(&req_auth)));
        });
    }

    group.finish();
}

fn bench_attribute_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("attribute_lookup");
    let dictionary = Arc::new(Dictionary::standard());

    let mut packet = create_test_packet(&dictionary, 20);
    packet.push_attribute(
        Attribute::vendor_specific(9, 1, b"ciscoval").expect("Failed to create VSA"),
    );

    group.bench_function("by_name", |b| {
        b.iter(|| packet.get_attributes(black_box("Reply-Message")));
    });

    group.bench_function("vendor_specific", |b| {
        b.iter(|| packet.get_first_attribute(black_box("Vendor-Specific")));
    });

    group.bench_function("by_code", |b| {
        b.iter(|| packet.find_attribute(black_box(AttributeType::UserName as u8)));
    });

    group.finish();
}

fn bench_full_request_cycle(c: &mut Criterion) {
    let dictionary = Arc::new(Dictionary::standard());

    c.bench_function("full_request_encode_decode", |b| {
        b.iter(|| {
            let packet = create_test_packet(&dictionary, 2);
            let encoded = packet.encode(SECRET).expect("Failed to encode");
            let decoded =
                Packet::decode(&encoded, SECRET, Arc::clone(&dictionary)).expect("Failed to decode");
            black_box(decoded)
        });
    });
}

criterion_group!(
    benches,
    bench_packet_encode,
    bench_packet_decode,
    bench_password_obfuscation,
    bench_attribute_lookup,
    bench_full_request_cycle
);
criterion_main!(benches);
