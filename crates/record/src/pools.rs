//! Fixed field pools and line-format constants.
//!
//! The pools are small on purpose: the dedup scenarios want repeated
//! client/path combinations, not realistic traffic diversity.

/// Client addresses sampled for synthesized records (9 IPv4 + 1 IPv6).
pub const CLIENT_ADDRS: [&str; 10] = [
    "2803:c600:9101:8144:1f7:a15:21a6:981",
    "181.43.228.197",
    "138.84.62.153",
    "64.76.142.75",
    "179.60.74.234",
    "200.104.214.144",
    "191.115.105.54",
    "186.11.13.107",
    "186.40.96.82",
    "38.51.244.94",
];

/// Request paths sampled for synthesized records.
pub const REQUEST_PATHS: [&str; 6] = [
    "/prod/client/Windows/KeyList_2.5.0.json",
    "/prod/client/Android/PreDownload.json",
    "/prod/client/IOS/VideoConfig.json",
    "/prod/client/Windows/pakchunk0-WindowsNoEditor_P.pak",
    "/prod/client/Android/GameConfig.json",
    "/prod/client/IOS/AssetBundle.pak",
];

/// Base user-agent strings; synthesis prepends [`UA_TEST_MARKER`].
pub const USER_AGENTS: [&str; 4] = [
    "Client/++UE4+Release-4.26-CL-144272156 Windows/10.0.26100.1.256.64bit",
    "Client/++UE4+Release-4.26-CL-142563600 Android/14",
    "Client/++UE4+Release-4.26-CL-142563677 IOS/18.5",
    "Client/++UE4+Release-4.26-CL-142563600 Android/15",
];

/// Marker prefix so generated traffic is unmistakably synthetic.
pub const UA_TEST_MARKER: &str = "TestClient-DEDUP-QA/";

/// Hostname used for every synthesized request.
pub const TEST_HOST: &str = "cdn-test-dedup-qa.aki-game.net";

/// Path prefix applied to synthesized requests.
pub const TEST_PATH_PREFIX: &str = "/test-dedup";

/// Edge-server address (second address field of the line format).
pub const EDGE_ADDR: &str = "45.82.103.8";

/// Country code field.
pub const COUNTRY: &str = "CL";

/// Content type field.
pub const CONTENT_TYPE: &str = "application/json";

/// Fixed HTTP date field (a placeholder; never varies).
pub const HTTP_DATE: &str = "Tue, 12 Aug 2025 13:28:00 GMT";

/// Response size used when a scenario has no reason to vary it.
pub const DEFAULT_RESPONSE_SIZE: u64 = 1494;

/// Response size of the hot record in the skewed scenario (a large .pak).
pub const HOT_RESPONSE_SIZE: u64 = 110_851_647;
