pub(crate) mod assignments;
pub(crate) mod health;
pub(crate) mod users;
