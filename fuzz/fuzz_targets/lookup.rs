#![no_main]
use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use opaqueid::{
    Codebook, Dispatcher, Error, Format, IdentityService, Registration, ResourceIdentity,
    TokenEncoder, DEFAULT_ICN_PATTERN, V2_PREFIX, V3_PREFIX,
};

struct EmptyRegistry;

impl IdentityService for EmptyRegistry {
    fn lookup(&self, _id: &str) -> Result<Vec<ResourceIdentity>, Error> {
        Ok(vec![])
    }

    fn register(&self, _: &[ResourceIdentity]) -> Result<Vec<Registration>, Error> {
        Ok(vec![])
    }
}

static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

fn dispatcher() -> &'static Dispatcher {
    DISPATCHER.get_or_init(|| {
        Dispatcher::new(vec![
            Format::patient_icn(DEFAULT_ICN_PATTERN).unwrap(),
            Format::encoded_token(
                V3_PREFIX,
                TokenEncoder::v3("random-key", Codebook::empty()).unwrap(),
            ),
            Format::encoded_token(
                V2_PREFIX,
                TokenEncoder::v2("random-key", Codebook::empty()).unwrap(),
            ),
            Format::uuid_delegate(Arc::new(EmptyRegistry)),
        ])
    })
}

fuzz_target!(|data: &[u8]| {
    let _ = dispatcher().lookup(&String::from_utf8_lossy(data));
});
