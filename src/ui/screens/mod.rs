pub(crate) mod calendar;
pub(crate) mod day;
pub(crate) mod form;
