//! # Runtime Flow
//!
//! Config file on disk, script on disk, executor in between. Mirrors what
//! the `vt-runtime` binary does without touching the process environment.

#[cfg(test)]
mod tests {
    use shared_types::Address;
    use std::io::Write;
    use vt_product_registry::prelude::*;
    use vt_runtime::{build_executor, load_script, RuntimeConfig};

    const SCRIPT: &str = r#"[
        [
            { "caller": "0xd0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0",
              "call": { "function": "add-manufacturer",
                        "args": { "candidate": "0x0101010101010101010101010101010101010101" } } },
            { "caller": "0x0101010101010101010101010101010101010101",
              "call": { "function": "add-manufacturer",
                        "args": { "candidate": "0x0202020202020202020202020202020202020202" } } }
        ],
        [
            { "caller": "0x0101010101010101010101010101010101010101",
              "call": { "function": "register-product",
                        "args": { "product_id": "PROD123", "description": "Authentic Product XYZ" } } }
        ],
        [
            { "caller": "0x0101010101010101010101010101010101010101",
              "call": { "function": "transfer-ownership",
                        "args": { "product_id": "PROD123",
                                  "new_owner": "0x0202020202020202020202020202020202020202" } } },
            { "caller": "0xd0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0",
              "call": { "function": "transfer-ownership",
                        "args": { "product_id": "PROD123",
                                  "new_owner": "0x0303030303030303030303030303030303030303" } } },
            { "caller": "0xd0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0",
              "call": { "function": "get-product-owner",
                        "args": { "product_id": "PROD123" } } }
        ]
    ]"#;

    #[test]
    fn test_replay_script_from_disk() {
        let dir = tempfile::tempdir().unwrap();

        let config_path = dir.path().join("runtime.json");
        let mut config_file = std::fs::File::create(&config_path).unwrap();
        write!(
            config_file,
            r#"{{ "owner": "0xd0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0d0", "start_height": 100 }}"#
        )
        .unwrap();

        let script_path = dir.path().join("script.json");
        std::fs::write(&script_path, SCRIPT).unwrap();

        let config = RuntimeConfig::from_file(&config_path).unwrap();
        config.validate().unwrap();
        let mut executor = build_executor(&config).unwrap();
        let blocks = executor.run_script(&load_script(&script_path).unwrap());

        let heights: Vec<u64> = blocks.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![100, 101, 102]);

        let codes: Vec<Vec<Option<u32>>> = blocks
            .iter()
            .map(|b| b.receipts.iter().map(CallReceipt::error_code).collect())
            .collect();
        assert_eq!(
            codes,
            vec![
                vec![None, Some(codes::NOT_OWNER)],
                vec![None],
                vec![None, Some(codes::NOT_CURRENT_OWNER), None],
            ]
        );
        assert_eq!(
            blocks[2].receipts[2].result,
            Ok(CallOutput::Owner(Address::repeat_byte(2)))
        );

        let registry = executor.registry();
        assert_eq!(registry.verify_product("PROD123").unwrap().registered_at, 101);
        assert_eq!(registry.stats().calls_rejected, 2);
    }

    #[test]
    fn test_receipts_serialize_for_output() {
        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("script.json");
        std::fs::write(&script_path, SCRIPT).unwrap();

        let config = RuntimeConfig {
            owner: Address::repeat_byte(0xD0),
            ..Default::default()
        };
        let mut executor = build_executor(&config).unwrap();
        let blocks = executor.run_script(&load_script(&script_path).unwrap());

        let json = serde_json::to_value(&blocks).unwrap();
        assert_eq!(json[0]["receipts"][1]["function"], "add-manufacturer");
        assert_eq!(json[0]["receipts"][1]["result"]["Err"], 100);
        assert_eq!(json[1]["receipts"][0]["result"]["Ok"]["kind"], "record");
    }
}
