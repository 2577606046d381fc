//! Execution Observer Tests.

use mockall::Sequence;
use pretty_assertions::assert_eq;
use rvss_core::common::reg::RegisterClass;
use rvss_core::sim::observer::{ChannelObserver, VmEvent};

use crate::common::builder::instruction::inst;
use crate::common::harness::TestContext;
use crate::common::mocks::observer::MockObserver;

#[test]
fn channel_receives_commits_in_order() {
    let mut ctx = TestContext::new().load_program(&[
        inst().addi(1, 0, 5).build(),
        inst().sb(5, 1, 0).build(),
        inst().li(17, 10).build(),
        inst().ecall().build(),
    ]);
    ctx.set_reg(5, 0x1000_0000);
    let (observer, events) = ChannelObserver::channel();
    ctx.sim.set_observer(Box::new(observer));
    let _ = ctx.run();

    let events: Vec<VmEvent> = events.try_iter().collect();
    assert_eq!(
        events,
        vec![
            VmEvent::RegisterUpdate {
                class: RegisterClass::Gpr,
                index: 1,
                value: 5
            },
            VmEvent::MemoryUpdate {
                address: 0x1000_0000,
                bytes: vec![5]
            },
            VmEvent::RegisterUpdate {
                class: RegisterClass::Gpr,
                index: 17,
                value: 10
            },
            VmEvent::Exit(0),
        ]
    );
}

#[test]
fn x0_writes_are_not_reported() {
    let mut ctx = TestContext::new().load_program(&[inst().addi(0, 0, 5).build()]);
    let (observer, events) = ChannelObserver::channel();
    ctx.sim.set_observer(Box::new(observer));
    let _ = ctx.run();
    assert_eq!(events.try_iter().count(), 0);
}

#[test]
fn warnings_carry_the_error_message() {
    let mut ctx = TestContext::new().load_program(&[inst().ecall().build()]);
    ctx.set_reg(17, 1234);
    let (observer, events) = ChannelObserver::channel();
    ctx.sim.set_observer(Box::new(observer));
    let _ = ctx.run();

    let events: Vec<VmEvent> = events.try_iter().collect();
    assert!(matches!(&events[..], [VmEvent::Warning(msg)] if msg.contains("1234")));
}

#[test]
fn undo_reports_restored_values() {
    let mut ctx = TestContext::new().load_program(&[inst().addi(1, 0, 5).build()]);
    let _ = ctx.sim.debug_step().unwrap();

    let mut observer = MockObserver::new();
    let mut seq = Sequence::new();
    let _ = observer
        .expect_on_register_update()
        .withf(|class, index, value| *class == RegisterClass::Gpr && *index == 1 && *value == 0)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| ());
    let _ = observer
        .expect_on_register_update()
        .withf(|class, index, value| *class == RegisterClass::Gpr && *index == 1 && *value == 5)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| ());
    ctx.sim.set_observer(Box::new(observer));

    assert!(ctx.sim.undo().unwrap());
    assert!(ctx.sim.redo().unwrap());
}

#[test]
fn events_serialize_adjacently_tagged() {
    assert_eq!(
        serde_json::to_value(VmEvent::Exit(3)).unwrap(),
        serde_json::json!({ "event": "exit", "data": 3 })
    );
    assert_eq!(
        serde_json::to_value(VmEvent::RegisterUpdate {
            class: RegisterClass::Fpr,
            index: 2,
            value: 9
        })
        .unwrap(),
        serde_json::json!({
            "event": "register_update",
            "data": { "class": "Fpr", "index": 2, "value": 9 }
        })
    );
}
