//! Tests for the generated method structs

use serde_json::json;
use spdk_rpc_core::request::method_name_for;
use spdk_rpc_core::{RequestBuilder, RpcMethod};
use spdk_rpc_methods::*;

#[test]
fn test_method_constants() {
    assert_eq!(SpdkGetVersion::METHOD, "spdk_get_version");
    assert_eq!(BdevGetBdevs::METHOD, "bdev_get_bdevs");
    assert_eq!(BdevMallocCreate::METHOD, "bdev_malloc_create");
    assert_eq!(BdevMallocDelete::METHOD, "bdev_malloc_delete");
    assert_eq!(BdevSetQosLimit::METHOD, "bdev_set_qos_limit");
    assert_eq!(BdevWaitForExamine::METHOD, "bdev_wait_for_examine");
    assert_eq!(IobufSetOptions::METHOD, "iobuf_set_options");
    assert_eq!(IobufGetStats::METHOD, "iobuf_get_stats");
    assert_eq!(KeyringFileAddKey::METHOD, "keyring_file_add_key");
    assert_eq!(KeyringFileRemoveKey::METHOD, "keyring_file_remove_key");
    assert_eq!(KeyringGetKeys::METHOD, "keyring_get_keys");
    assert_eq!(KeyringLinuxSetOptions::METHOD, "keyring_linux_set_options");
}

#[test]
fn test_constant_matches_type_name_derivation() {
    assert_eq!(method_name_for::<BdevGetBdevs>(), BdevGetBdevs::METHOD);
    assert_eq!(method_name_for::<KeyringLinuxSetOptions>(), KeyringLinuxSetOptions::METHOD);
}

#[test]
fn test_no_param_methods_have_empty_params() {
    assert!(SpdkGetVersion::default().to_params().unwrap().is_empty());
    assert!(BdevWaitForExamine::default().to_params().unwrap().is_empty());
    assert!(IobufGetStats::default().to_params().unwrap().is_empty());
    assert!(KeyringGetKeys::default().to_params().unwrap().is_empty());
}

#[test]
fn test_optional_params_are_omitted_when_unset() {
    let params = BdevGetBdevs::default().to_params().unwrap();
    assert!(params.is_empty());

    let params = BdevGetBdevs {
        Name: Some("Malloc0".to_string()),
        Timeout: Some(2000),
    }
    .to_params()
    .unwrap();
    assert_eq!(serde_json::Value::Object(params), json!({"name": "Malloc0", "timeout": 2000}));
}

#[test]
fn test_required_params_always_present() {
    let params = KeyringFileAddKey {
        Name: "key0".to_string(),
        Path: "/tmp/key0".to_string(),
    }
    .to_params()
    .unwrap();
    assert_eq!(serde_json::Value::Object(params), json!({"name": "key0", "path": "/tmp/key0"}));

    let params = BdevMallocCreate {
        NumBlocks: 0,
        BlockSize: 0,
        ..Default::default()
    }
    .to_params()
    .unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params["num_blocks"], 0);
    assert_eq!(params["block_size"], 0);
}

#[test]
fn test_normalized_field_types() {
    let params = BdevMallocCreate {
        Name: Some("Malloc0".to_string()),
        NumBlocks: 16384,
        BlockSize: 512,
        MdInterleave: Some(true),
        DifType: Some(1),
        ..Default::default()
    };

    let params = params.to_params().unwrap();
    assert_eq!(params["md_interleave"], true);
    assert_eq!(params["dif_type"], 1);
    assert_eq!(params["num_blocks"], 16384);
}

#[test]
fn test_serde_agrees_with_to_params() {
    let value = IobufSetOptions {
        SmallPoolCount: Some(8192),
        LargeBufsize: Some(135168),
        ..Default::default()
    };

    let explicit = RequestBuilder::build(&value).unwrap();
    let serialized = RequestBuilder::build_serialized(&value).unwrap();
    assert_eq!(explicit, serialized);
}

#[test]
fn test_deserialize_from_wire_keys() {
    let value: KeyringLinuxSetOptions = serde_json::from_value(json!({"enable": true})).unwrap();
    assert_eq!(value.Enable, Some(true));

    let value: BdevMallocDelete = serde_json::from_value(json!({"name": "Malloc0"})).unwrap();
    assert_eq!(value.Name, "Malloc0");

    assert!(serde_json::from_value::<BdevMallocDelete>(json!({})).is_err());
}

#[test]
fn test_passthrough_type_field() {
    let default = BdevSetQosLimit::default();
    assert_eq!(default.Name, "");
    assert_eq!(default.RwIosPerSec, None);
    assert_eq!(serde_json::Value::Object(default.to_params().unwrap()), json!({"name": ""}));

    let value = BdevSetQosLimit {
        Name: "Malloc0".to_string(),
        RwIosPerSec: Some(20000),
        WMbytesPerSec: Some(u64::MAX),
        ..Default::default()
    };
    let params = value.to_params().unwrap();
    assert_eq!(
        serde_json::Value::Object(params),
        json!({"name": "Malloc0", "rw_ios_per_sec": 20000, "w_mbytes_per_sec": u64::MAX})
    );

    let parsed: BdevSetQosLimit =
        serde_json::from_value(json!({"name": "Malloc0", "rw_ios_per_sec": 20000, "w_mbytes_per_sec": u64::MAX}))
            .unwrap();
    assert_eq!(parsed, value);

    assert!(serde_json::from_value::<BdevSetQosLimit>(json!({"name": "Malloc0", "rw_ios_per_sec": -1})).is_err());
}

#[test]
fn test_build_serialized_through_box() {
    let value = Box::new(BdevSetQosLimit {
        Name: "Malloc0".to_string(),
        RMbytesPerSec: Some(100),
        ..Default::default()
    });

    let serialized = RequestBuilder::build_serialized(&value).unwrap();
    assert_eq!(serialized, RequestBuilder::build(&*value).unwrap());
    assert_eq!(method_name_for::<std::sync::Arc<BdevSetQosLimit>>(), BdevSetQosLimit::METHOD);
}
