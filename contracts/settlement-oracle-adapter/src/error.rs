use soroban_sdk::contracterror;

/// Contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum AdapterError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotContractOwner = 3,
    NoPermissionToSetValue = 4,
    NoOracleSubmissionAfterExpiryTime = 5,
    MinPeriodUndisputedNotPassed = 6,
    AlreadyConfirmedPool = 7,
    NotConfirmedPool = 8,
    OutOfRange = 9,
    InvalidExcessFeeRecipient = 10,
    PendingMaxFeeAmountUsdUpdate = 11,
    PendingExcessFeeRecipientUpdate = 12,
    MaxFeeAmountUsdAlreadyActive = 13,
    ExcessFeeRecipientAlreadyActive = 14,
    InvalidAmount = 15,
    InvalidReportValue = 16,
    UnsupportedCollateralDecimals = 17,
    ArithmeticOverflow = 18,
}
