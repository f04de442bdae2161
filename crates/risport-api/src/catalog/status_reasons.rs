/// `StatusReason` codes reported for devices that are not registered.
///
/// Sorted by code. 0 means the device is registered without error.
pub static STATUS_REASONS: &[(u32, &str)] = &[
    (0, "NoError"),
    (1, "Unknown"),
    (6, "ConnectivityError"),
    (8, "DeviceInitiatedReset"),
    (9, "CallManagerReset"),
    (10, "DeviceUnregistered"),
    (11, "MalformedRegisterMsg"),
    (12, "SCCPDeviceThrottling"),
    (13, "KeepAliveTimeout"),
    (14, "ConfigurationMismatch"),
    (15, "CallManagerRestart"),
    (16, "DuplicateRegistration"),
    (17, "CallManagerApplyConfig"),
    (18, "DeviceNoResponse"),
    (19, "EMLoginLogout"),
    (20, "EMCCLoginLogout"),
    (21, "EnergySaveMode"),
    (22, "CallManagerForcedRestart"),
    (23, "SourceIPAddrChanged"),
    (24, "SourcePortChanged"),
    (25, "RegistrationSequenceError"),
    (26, "InvalidCapabilities"),
    (27, "CapabilityResponseTimeout"),
    (28, "SecurityMismatch"),
    (29, "AutoRegisterDBError"),
    (30, "DBAccessError"),
    (31, "AutoRegisterDBConfigTimeout"),
    (32, "DeviceTypeMismatch"),
    (33, "AddressingModeMismatch"),
];
