use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use secp_curve::RandomField;
use secp_schnorr::{
    Point, Scalar, SigningKey, VerifyingKey, batch_verify, blind_message, blind_sign, musig,
    unblind,
};

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let msg: [u8; 32] = rng.random();

    c.bench_function("schnorr_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(black_box(&msg)).expect("sign");
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let msg: [u8; 32] = rng.random();
    let sig = sk.sign(&msg).expect("sign");

    c.bench_function("schnorr_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(black_box(&msg), black_box(&sig)).expect("verify");
            black_box(ok);
        })
    });
}

fn bench_batch_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("schnorr_batch_verify");

    for size in [4usize, 16, 64] {
        let keys: Vec<SigningKey> = (0..size).map(|_| SigningKey::random(&mut rng)).collect();
        let pubkeys: Vec<VerifyingKey> = keys.iter().map(VerifyingKey::from).collect();
        let messages: Vec<[u8; 32]> = (0..size).map(|_| rng.random()).collect();
        let signatures: Vec<_> = keys
            .iter()
            .zip(&messages)
            .map(|(sk, msg)| sk.sign(msg).expect("sign"))
            .collect();

        group.bench_function(format!("{size}"), |bencher| {
            bencher.iter(|| {
                let ok = batch_verify(
                    black_box(&pubkeys),
                    black_box(&messages),
                    black_box(&signatures),
                    &mut rng,
                )
                .expect("batch");
                black_box(ok);
            })
        });
    }
    group.finish();
}

fn bench_blind_flow(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let signer = SigningKey::random(&mut rng);
    let signer_pk = signer.verifying_key();
    let k = Scalar::random_nonzero(&mut rng);
    let nonce = Point::GENERATOR * k;
    let msg: [u8; 32] = rng.random();

    c.bench_function("blind_sign_flow", |bencher| {
        bencher.iter(|| {
            let (unblinder, blinded) =
                blind_message(b"session", &nonce, &signer_pk, black_box(&msg)).expect("blind");
            let blinded_sig = blind_sign(&signer, &k, &blinded).expect("blind sign");
            black_box(unblind(&unblinder, &blinded_sig));
        })
    });
}

fn bench_musig(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<SigningKey> = (0..5).map(|_| SigningKey::random(&mut rng)).collect();
    let pubkeys: Vec<VerifyingKey> = keys.iter().map(VerifyingKey::from).collect();
    let msg: [u8; 32] = rng.random();

    c.bench_function("musig_pubkey_combine_5", |bencher| {
        bencher.iter(|| black_box(musig::pubkey_combine(black_box(&pubkeys)).expect("combine")))
    });

    c.bench_function("musig_sign_5", |bencher| {
        bencher.iter(|| black_box(musig::sign(black_box(&keys), &msg).expect("sign")))
    });
}

criterion_group!(
    benches,
    bench_sign,
    bench_verify,
    bench_batch_verify,
    bench_blind_flow,
    bench_musig
);
criterion_main!(benches);
