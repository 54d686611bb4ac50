use kvcache_sim_core::{ByteAddr, OpKind, Operation, Trace};

#[test]
fn read_and_write_constructors_set_the_right_kind() {
    let read = Operation::read(ByteAddr(0));
    let write = Operation::write(ByteAddr(0));
    assert_eq!(read.op_kind, OpKind::Read);
    assert_eq!(write.op_kind, OpKind::Write);
}

#[test]
fn trace_iteration_preserves_insertion_order() {
    let mut trace = Trace::new();
    trace.push(Operation::read(ByteAddr(0)));
    trace.push(Operation::write(ByteAddr(128)));
    trace.push(Operation::read(ByteAddr(256)));

    let kinds: Vec<OpKind> = trace.iter().map(|op| op.op_kind).collect();
    assert_eq!(kinds, vec![OpKind::Read, OpKind::Write, OpKind::Read]);
}

#[test]
fn collecting_from_an_iterator_matches_pushing_one_at_a_time() {
    let collected: Trace = (0..5).map(|i| Operation::read(ByteAddr(i * 128))).collect();

    let mut pushed = Trace::new();
    for i in 0..5 {
        pushed.push(Operation::read(ByteAddr(i * 128)));
    }

    assert_eq!(collected, pushed);
}
