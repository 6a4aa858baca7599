use mockall::mock;
use rota_core::store::KeyValueStore;

// Mock slot storage for testing
mock! {
    pub SlotStore {}

    impl KeyValueStore for SlotStore {
        fn get(&self, key: &str) -> eyre::Result<Option<String>>;

        fn set(&self, key: &str, value: &str) -> eyre::Result<()>;
    }
}
