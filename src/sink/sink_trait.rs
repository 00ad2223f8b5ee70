use super::SinkEvent;

pub trait SinkDelegate<T>: FnMut(SinkEvent<T>) + Send {}
impl<T, F: FnMut(SinkEvent<T>) + Send> SinkDelegate<T> for F {}

pub type BoxedSinkDelegate<'a, T> = Box<dyn FnMut(SinkEvent<T>) + Send + 'a>;
