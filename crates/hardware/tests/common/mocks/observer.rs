use mockall::mock;
use rvss_core::common::error::SimError;
use rvss_core::common::reg::RegisterClass;
use rvss_core::sim::observer::ExecutionObserver;

mock! {
    pub Observer {}
    impl ExecutionObserver for Observer {
        fn on_register_update(&mut self, class: RegisterClass, index: usize, value: u64);
        fn on_memory_update(&mut self, address: u64, bytes: &[u8]);
        fn on_output(&mut self, text: &str);
        fn on_exit(&mut self, code: i64);
        fn on_warning(&mut self, error: &SimError);
    }
}

/// A mock that accepts any number of register and memory updates.
///
/// Tests add expectations for the events they care about on top.
pub fn permissive_observer() -> MockObserver {
    let mut observer = MockObserver::new();
    let _ = observer.expect_on_register_update().returning(|_, _, _| ());
    let _ = observer.expect_on_memory_update().returning(|_, _| ());
    observer
}
