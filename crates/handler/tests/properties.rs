#[macro_use]
mod common;

use common::*;
use proptest::prelude::*;

named!(SeqDefault, SeqA, SeqB, SeqC);
type Sequenced = PolymorphicHandler<dyn Named, SeqDefault, LogHooks>;

#[derive(Debug, Clone, Copy)]
enum Op {
	Set(usize),
	Reset,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![3 => (0usize..3).prop_map(Op::Set), 1 => Just(Op::Reset)]
}

fn apply(op: Op) -> (Option<&'static str>, &'static str) {
	let (previous, installed) = match op {
		Op::Set(0) => (Sequenced::set(StaticLifetimeGuard::<SeqA>::new()), "SeqA"),
		Op::Set(1) => (Sequenced::set(StaticLifetimeGuard::<SeqB>::new()), "SeqB"),
		Op::Set(_) => (Sequenced::set(StaticLifetimeGuard::<SeqC>::new()), "SeqC"),
		Op::Reset => (Sequenced::reset(), "SeqDefault"),
	};
	(previous.map(|p| p.name()), installed)
}

fn active_by_name(name: &str) -> bool {
	match name {
		"SeqA" => is_active::<SeqA>(),
		"SeqB" => is_active::<SeqB>(),
		"SeqC" => is_active::<SeqC>(),
		_ => is_active::<SeqDefault>(),
	}
}

proptest! {
	#[test]
	fn get_returns_most_recently_installed(ops in prop::collection::vec(op(), 1..48)) {
		let mut expected = Sequenced::get().name();
		for op in ops {
			let (previous, installed) = apply(op);
			prop_assert_eq!(previous, Some(expected));
			prop_assert_eq!(Sequenced::get().name(), installed);

			prop_assert!(active_by_name(installed));
			if expected != installed {
				prop_assert!(!active_by_name(expected), "{} still active", expected);
			}
			expected = installed;
		}
	}
}
