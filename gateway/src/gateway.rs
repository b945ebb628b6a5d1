//! Read and write operations against the deployed ballot contract.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;

use ballot_provider::{ProviderError, WalletProvider};
use ballot_types::{Account, CandidateId, ChainId, Tally, TxReceipt};

use crate::abi::IVoting;
use crate::error::GatewayError;

/// Typed access to the fixed voting contract.
///
/// The contract address and its home chain are set once at construction.
/// The gateway itself holds no mutable state: every read is idempotent
/// and every write is submitted exactly once, with failures surfaced
/// verbatim — no client-side retry.
pub struct ContractGateway {
    provider: Arc<dyn WalletProvider>,
    contract_address: Address,
    chain: ChainId,
}

impl ContractGateway {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        contract_address: Address,
        chain: ChainId,
    ) -> Self {
        Self {
            provider,
            contract_address,
            chain,
        }
    }

    /// The configured contract address.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// The chain the contract is deployed on.
    pub fn chain(&self) -> ChainId {
        self.chain
    }

    /// Fetch the current vote counts in fixed (A, B) order.
    pub async fn read_tally(&self) -> Result<Tally, GatewayError> {
        let data = IVoting::getVotesCall {}.abi_encode();
        let output = self
            .provider
            .call(self.contract_address, Bytes::from(data))
            .await
            .map_err(|e| GatewayError::Read(e.to_string()))?;

        let decoded = IVoting::getVotesCall::abi_decode_returns(&output)
            .map_err(|e| GatewayError::Read(format!("malformed getVotes output: {e}")))?;

        let tally = Tally::new(decoded.a, decoded.b);
        tracing::debug!(a = %tally.candidate_a, b = %tally.candidate_b, "tally read");
        Ok(tally)
    }

    /// Submit a vote for `candidate`, attributed to `account`.
    pub async fn cast_vote(
        &self,
        candidate: CandidateId,
        account: Account,
    ) -> Result<TxReceipt, GatewayError> {
        let data = match candidate {
            CandidateId::A => IVoting::voteForCandidateACall {}.abi_encode(),
            CandidateId::B => IVoting::voteForCandidateBCall {}.abi_encode(),
        };

        let hash = self
            .provider
            .send_transaction(account, self.contract_address, Bytes::from(data))
            .await
            .map_err(map_write_error)?;

        tracing::info!(candidate = candidate.as_str(), tx = %hash, "vote submitted");
        Ok(TxReceipt {
            transaction_hash: hash,
        })
    }

    /// Check that the provider is on the contract's network.
    pub async fn verify_chain(&self) -> Result<(), GatewayError> {
        let actual = self
            .provider
            .chain_id()
            .await
            .map_err(|e| GatewayError::Read(e.to_string()))?;
        if actual != self.chain {
            return Err(GatewayError::ChainMismatch {
                expected: self.chain,
                actual,
            });
        }
        Ok(())
    }
}

/// A declined transaction is a user decision, not a write failure.
fn map_write_error(e: ProviderError) -> GatewayError {
    match e {
        ProviderError::Rejected(reason) => GatewayError::Rejected(reason),
        other => GatewayError::Write(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use alloy_sol_types::SolValue;
    use ballot_nullables::{NullProvider, RecordedCall};

    const CONTRACT: Address = Address::repeat_byte(0x42);

    fn account(byte: u8) -> Account {
        Account::new(Address::repeat_byte(byte))
    }

    fn tally_bytes(a: u64, b: u64) -> Bytes {
        Bytes::from((U256::from(a), U256::from(b)).abi_encode())
    }

    fn gateway(provider: &Arc<NullProvider>) -> ContractGateway {
        ContractGateway::new(
            Arc::clone(provider) as Arc<dyn WalletProvider>,
            CONTRACT,
            ChainId::MAINNET,
        )
    }

    #[tokio::test]
    async fn read_tally_decodes_pair() {
        let provider = Arc::new(NullProvider::new());
        provider.push_call_response(Ok(tally_bytes(3, 5)));

        let tally = gateway(&provider).read_tally().await.unwrap();
        assert_eq!(tally.candidate_a, U256::from(3u64));
        assert_eq!(tally.candidate_b, U256::from(5u64));
    }

    #[tokio::test]
    async fn read_tally_maps_malformed_output_to_read_error() {
        let provider = Arc::new(NullProvider::new());
        provider.push_call_response(Ok(Bytes::from(vec![0u8; 7])));

        let err = gateway(&provider).read_tally().await.unwrap_err();
        assert!(matches!(err, GatewayError::Read(_)));
    }

    #[tokio::test]
    async fn cast_vote_sends_the_mapped_method() {
        let provider = Arc::new(NullProvider::new());
        let voter = account(0x11);

        gateway(&provider)
            .cast_vote(CandidateId::A, voter)
            .await
            .unwrap();
        gateway(&provider)
            .cast_vote(CandidateId::B, voter)
            .await
            .unwrap();

        let sends: Vec<_> = provider
            .recorded()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::SendTransaction { from, to, data } => Some((from, to, data)),
                _ => None,
            })
            .collect();
        assert_eq!(sends.len(), 2);
        assert_eq!(sends[0].0, voter);
        assert_eq!(sends[0].1, CONTRACT);
        assert_eq!(
            sends[0].2.as_ref(),
            IVoting::voteForCandidateACall::SELECTOR.as_slice()
        );
        assert_eq!(
            sends[1].2.as_ref(),
            IVoting::voteForCandidateBCall::SELECTOR.as_slice()
        );
    }

    #[tokio::test]
    async fn rejected_transaction_is_not_a_write_failure() {
        let provider = Arc::new(NullProvider::new());
        provider.push_send_response(Err(ProviderError::Rejected("denied".into())));

        let err = gateway(&provider)
            .cast_vote(CandidateId::A, account(0x11))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
    }

    #[tokio::test]
    async fn reverted_transaction_surfaces_reason_verbatim() {
        let provider = Arc::new(NullProvider::new());
        provider.push_send_response(Err(ProviderError::Rpc {
            code: -32000,
            message: "execution reverted".into(),
        }));

        let err = gateway(&provider)
            .cast_vote(CandidateId::B, account(0x11))
            .await
            .unwrap_err();
        match err {
            GatewayError::Write(reason) => assert!(reason.contains("execution reverted")),
            other => panic!("expected Write, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn verify_chain_detects_mismatch() {
        let provider = Arc::new(NullProvider::new());
        provider.set_chain(ChainId::SEPOLIA);

        let err = gateway(&provider).verify_chain().await.unwrap_err();
        match err {
            GatewayError::ChainMismatch { expected, actual } => {
                assert_eq!(expected, ChainId::MAINNET);
                assert_eq!(actual, ChainId::SEPOLIA);
            }
            other => panic!("expected ChainMismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn verify_chain_passes_on_match() {
        let provider = Arc::new(NullProvider::new());
        provider.set_chain(ChainId::MAINNET);
        assert!(gateway(&provider).verify_chain().await.is_ok());
    }
}
