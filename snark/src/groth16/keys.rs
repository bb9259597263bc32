use crate::r1cs::ConstraintSystem;
use kiln_algebra::prelude::*;

/// The Groth16 proving key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingKey<F, G1, G2> {
    /// `[α]₁`.
    pub alpha_g1: G1,
    /// `[β]₁`.
    pub beta_g1: G1,
    /// `[β]₂`.
    pub beta_g2: G2,
    /// `[δ]₁`.
    pub delta_g1: G1,
    /// `[δ]₂`.
    pub delta_g2: G2,
    /// `[A_i(τ)]₁` for every variable, the constant one included.
    pub a_query: Vec<G1>,
    /// `[B_i(τ)]₁` for every variable, the constant one included.
    pub b_query_g1: Vec<G1>,
    /// `[B_i(τ)]₂` for every variable, the constant one included.
    pub b_query_g2: Vec<G2>,
    /// `[τ^i·Z(τ)/δ]₁` for `i < D - 1`.
    pub h_query: Vec<G1>,
    /// `[(β·A_i(τ) + α·B_i(τ) + C_i(τ))/δ]₁` for every auxiliary variable.
    pub l_query: Vec<G1>,
    /// The constraint system the key was generated for, after any A/B swap.
    pub constraint_system: ConstraintSystem<F>,
}

impl<F: Domain, G1, G2> ProvingKey<F, G1, G2> {
    /// Check that the query lengths match the stored constraint system and
    /// its evaluation domain of size `domain_size`.
    pub fn has_consistent_shape(&self, domain_size: usize) -> bool {
        let cs = &self.constraint_system;
        let n = cs.num_variables() + 1;
        self.a_query.len() == n
            && self.b_query_g1.len() == n
            && self.b_query_g2.len() == n
            && self.l_query.len() == cs.auxiliary_input_size
            && self.h_query.len() + 1 == domain_size
    }
}

/// The Groth16 verifying key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey<G1, G2> {
    /// `[α]₁`.
    pub alpha_g1: G1,
    /// `[β]₂`.
    pub beta_g2: G2,
    /// `[γ]₂`.
    pub gamma_g2: G2,
    /// `[δ]₂`.
    pub delta_g2: G2,
    /// `[(β·A_i(τ) + α·B_i(τ) + C_i(τ))/γ]₁` for the constant one and every
    /// public input.
    pub gamma_abc_g1: Vec<G1>,
}

impl<G1, G2> VerifyingKey<G1, G2> {
    /// Return the number of public inputs the key accepts.
    pub fn num_inputs(&self) -> usize {
        self.gamma_abc_g1.len().saturating_sub(1)
    }
}

/// A verifying key with the pairing-side work done ahead of time.
#[derive(Debug, Clone)]
pub struct ProcessedVerifyingKey<G1, G2P, Gt> {
    /// `e([α]₁, [β]₂)`.
    pub alpha_g1_beta_g2: Gt,
    /// `-[γ]₂`, prepared.
    pub gamma_g2_neg_pc: G2P,
    /// `-[δ]₂`, prepared.
    pub delta_g2_neg_pc: G2P,
    /// Same as in the verifying key.
    pub gamma_abc_g1: Vec<G1>,
}

/// A Groth16 proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof<G1, G2> {
    /// `[A]₁`.
    pub a: G1,
    /// `[B]₂`.
    pub b: G2,
    /// `[C]₁`.
    pub c: G1,
}

/// A proving key together with its verifying key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypair<F, G1, G2> {
    /// The proving key.
    pub pk: ProvingKey<F, G1, G2>,
    /// The verifying key.
    pub vk: VerifyingKey<G1, G2>,
}

/// The proving key over a particular pairing.
pub type Groth16PK<P> =
    ProvingKey<<P as Pairing>::ScalarField, <P as Pairing>::G1, <P as Pairing>::G2>;

/// The verifying key over a particular pairing.
pub type Groth16VK<P> = VerifyingKey<<P as Pairing>::G1, <P as Pairing>::G2>;

/// The processed verifying key over a particular pairing.
pub type Groth16PVK<P> =
    ProcessedVerifyingKey<<P as Pairing>::G1, <P as Pairing>::G2Prepared, <P as Pairing>::Gt>;

/// The proof over a particular pairing.
pub type Groth16Pf<P> = Proof<<P as Pairing>::G1, <P as Pairing>::G2>;

/// The keypair over a particular pairing.
pub type Groth16Keypair<P> =
    Keypair<<P as Pairing>::ScalarField, <P as Pairing>::G1, <P as Pairing>::G2>;
