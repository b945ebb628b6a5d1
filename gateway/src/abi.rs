//! Fixed ABI of the deployed voting contract.

use alloy_sol_types::sol;

sol! {
    /// On-chain interface this client is compiled against.
    ///
    /// `getVotes` returns the two counters in fixed (A, B) order.
    interface IVoting {
        function getVotes() external view returns (uint256 a, uint256 b);
        function voteForCandidateA() external;
        function voteForCandidateB() external;
    }
}
