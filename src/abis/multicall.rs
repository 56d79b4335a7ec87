use alloy::sol;

pub use alloy::providers::MULTICALL3_ADDRESS;

// Multicall3, deployed at MULTICALL3_ADDRESS on most EVM chains.
// Only the entry point the aggregation engine speaks is bound here.
sol! {
    struct Call3 {
        address target;
        bool allowFailure;
        bytes callData;
    }

    struct McResult {
        bool success;
        bytes returnData;
    }

    #[sol(rpc)]
    interface IMulticall3 {
        function aggregate3(Call3[] calldata calls) external payable returns (McResult[] memory returnData);
    }
}
