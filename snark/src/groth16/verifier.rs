use super::{
    keys::{Groth16PVK, Groth16Pf, Groth16VK, ProcessedVerifyingKey},
    multi_exp,
};
use ark_std::{end_timer, start_timer};
use kiln_algebra::prelude::*;

/// Precompute `e(α, β)` and the prepared `-γ` and `-δ` of a verifying key.
pub fn verifier_process_vk<P: Pairing>(vk: &Groth16VK<P>) -> Groth16PVK<P> {
    let timer = start_timer!(|| "Groth16 process verification key");
    let pvk = ProcessedVerifyingKey {
        alpha_g1_beta_g2: P::pairing(&vk.alpha_g1, &vk.beta_g2),
        gamma_g2_neg_pc: P::prepare_g2(&vk.gamma_g2.neg()),
        delta_g2_neg_pc: P::prepare_g2(&vk.delta_g2.neg()),
        gamma_abc_g1: vk.gamma_abc_g1.clone(),
    };
    end_timer!(timer);
    pvk
}

/// Check `e(A, B)·e(acc, -γ)·e(C, -δ) = e(α, β)` with
/// `acc = gamma_abc[0] + Σ x_i·gamma_abc[i + 1]`.
fn check_pairing_equation<P: Pairing>(
    pvk: &Groth16PVK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    let (first, rest) = match pvk.gamma_abc_g1.split_first() {
        Some(split) => split,
        None => return false,
    };
    let acc_timer = start_timer!(|| "Accumulate the public input");
    let acc = *first + &multi_exp(primary_input, rest);
    end_timer!(acc_timer);

    let pairing_timer = start_timer!(|| "Multi-Miller loop");
    let lhs = P::product_of_prepared_pairings(
        &[proof.a, acc, proof.c],
        &[
            P::prepare_g2(&proof.b),
            pvk.gamma_g2_neg_pc.clone(),
            pvk.delta_g2_neg_pc.clone(),
        ],
    );
    end_timer!(pairing_timer);
    lhs == pvk.alpha_g1_beta_g2
}

/// Verify against a processed key, accepting an input shorter than the key
/// expects; the missing tail is treated as zero.
pub fn online_verifier_weak_ic<P: Pairing>(
    pvk: &Groth16PVK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    let timer = start_timer!(|| "Groth16 online verifier, weak input consistency");
    let ok = primary_input.len() < pvk.gamma_abc_g1.len()
        && check_pairing_equation::<P>(pvk, primary_input, proof);
    end_timer!(timer);
    ok
}

/// Verify against a processed key, requiring exactly as many inputs as the
/// key expects.
pub fn online_verifier_strong_ic<P: Pairing>(
    pvk: &Groth16PVK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    let timer = start_timer!(|| "Groth16 online verifier, strong input consistency");
    let ok = primary_input.len() + 1 == pvk.gamma_abc_g1.len()
        && check_pairing_equation::<P>(pvk, primary_input, proof);
    end_timer!(timer);
    ok
}

/// Verify against a processed key, see [`online_verifier_strong_ic`].
pub fn online_verifier<P: Pairing>(
    pvk: &Groth16PVK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    online_verifier_strong_ic::<P>(pvk, primary_input, proof)
}

/// Process `vk` and run [`online_verifier_weak_ic`].
pub fn verifier_weak_ic<P: Pairing>(
    vk: &Groth16VK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    let pvk = verifier_process_vk::<P>(vk);
    online_verifier_weak_ic::<P>(&pvk, primary_input, proof)
}

/// Process `vk` and run [`online_verifier_strong_ic`].
pub fn verifier_strong_ic<P: Pairing>(
    vk: &Groth16VK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    let pvk = verifier_process_vk::<P>(vk);
    online_verifier_strong_ic::<P>(&pvk, primary_input, proof)
}

/// Process `vk` and run [`online_verifier_strong_ic`].
pub fn verifier<P: Pairing>(
    vk: &Groth16VK<P>,
    primary_input: &[P::ScalarField],
    proof: &Groth16Pf<P>,
) -> bool {
    verifier_strong_ic::<P>(vk, primary_input, proof)
}
