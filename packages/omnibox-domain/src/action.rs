use std::{any::Any, fmt, sync::Arc};

/// Opaque capability attached to a candidate and resolved by the UI layer on commit.
///
/// The ranking core only moves it around; it never inspects or invokes it.
#[derive(Clone)]
pub struct CommitAction(Arc<dyn Any + Send + Sync>);
impl CommitAction {
	pub fn new<T>(command: T) -> Self
	where
		T: Any + Send + Sync,
	{
		Self(Arc::new(command))
	}

	pub fn downcast_ref<T>(&self) -> Option<&T>
	where
		T: Any,
	{
		self.0.downcast_ref::<T>()
	}

	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for CommitAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CommitAction(..)")
	}
}
