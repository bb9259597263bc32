use criterion::{criterion_group, criterion_main, Criterion};
use kiln_algebra::bn254::{BN254PairingEngine, BN254Scalar};
use kiln_algebra::prelude::*;
use kiln_snark::groth16::{generator, online_verifier, prover, verifier_process_vk};
use kiln_snark::mpc::{PowersOfTau, TranscriptHash};
use kiln_snark::r1cs::generate_r1cs_example_with_binary_input;

type P = BN254PairingEngine;

fn groth16(c: &mut Criterion) {
    let mut prng = test_rng();
    let ex = generate_r1cs_example_with_binary_input::<BN254Scalar, _>(1000, 100, &mut prng)
        .unwrap();
    let cs = &ex.constraint_system;

    let mut single_group = c.benchmark_group("generator");
    single_group.sample_size(10);
    single_group.bench_function("1000 constraints".to_string(), |b| {
        b.iter(|| generator::<P, _>(&mut prng, cs).unwrap());
    });
    single_group.finish();

    let keypair = generator::<P, _>(&mut prng, cs).unwrap();

    let mut single_group = c.benchmark_group("prover");
    single_group.sample_size(10);
    single_group.bench_function("1000 constraints".to_string(), |b| {
        b.iter(|| {
            prover(
                &mut prng,
                &keypair.pk,
                &ex.primary_input,
                &ex.auxiliary_input,
            )
            .unwrap()
        });
    });
    single_group.finish();

    let proof = prover(
        &mut prng,
        &keypair.pk,
        &ex.primary_input,
        &ex.auxiliary_input,
    )
    .unwrap();
    let pvk = verifier_process_vk::<P>(&keypair.vk);

    let mut single_group = c.benchmark_group("verifier");
    single_group.sample_size(10);
    single_group.bench_function("100 inputs".to_string(), |b| {
        b.iter(|| assert!(online_verifier::<P>(&pvk, &ex.primary_input, &proof)));
    });
    single_group.finish();
}

fn powers_of_tau(c: &mut Criterion) {
    let mut prng = test_rng();
    let digest = TranscriptHash::genesis(1024);
    let acc = PowersOfTau::<P>::new(1024).unwrap();

    let mut single_group = c.benchmark_group("powers of tau");
    single_group.sample_size(10);
    single_group.bench_function("contribute to 2^10".to_string(), |b| {
        b.iter(|| {
            let mut next = acc.clone();
            next.contribute(&mut prng, &digest).unwrap()
        });
    });
    single_group.bench_function("to_result over 2^10".to_string(), |b| {
        b.iter(|| acc.to_result(1024).unwrap());
    });
    single_group.finish();
}

criterion_group!(benches, groth16, powers_of_tau);
criterion_main!(benches);
