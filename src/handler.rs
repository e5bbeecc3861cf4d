use crate::context::InvocationContext;
use crate::event::FromEvent;
use crate::response::HandlerResult;
use std::future::Future;
use std::marker::PhantomData;

/// A user function.
///
/// Most code builds one with [`handler_fn`] or [`event_fn`] rather than
/// implementing this directly.
pub trait Handler: Send + Sync {
    type Event: FromEvent + Send + 'static;
    type Output: Into<HandlerResult> + Send + 'static;

    fn call(
        &self,
        ctx: InvocationContext,
        event: Self::Event,
    ) -> impl Future<Output = anyhow::Result<Self::Output>> + Send + 'static;
}

/// Handler taking both the context and the event.
pub struct HandlerFn<F, E> {
    f: F,
    _event: PhantomData<fn(E)>,
}

pub fn handler_fn<F, E>(f: F) -> HandlerFn<F, E> {
    HandlerFn {
        f,
        _event: PhantomData,
    }
}

impl<F, E, Fut, R> Handler for HandlerFn<F, E>
where
    F: Fn(InvocationContext, E) -> Fut + Send + Sync,
    E: FromEvent + Send + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<HandlerResult> + Send + 'static,
{
    type Event = E;
    type Output = R;

    fn call(
        &self,
        ctx: InvocationContext,
        event: E,
    ) -> impl Future<Output = anyhow::Result<R>> + Send + 'static {
        (self.f)(ctx, event)
    }
}

/// Handler that only looks at the event.
pub struct EventFn<F, E> {
    f: F,
    _event: PhantomData<fn(E)>,
}

pub fn event_fn<F, E>(f: F) -> EventFn<F, E> {
    EventFn {
        f,
        _event: PhantomData,
    }
}

impl<F, E, Fut, R> Handler for EventFn<F, E>
where
    F: Fn(E) -> Fut + Send + Sync,
    E: FromEvent + Send + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<HandlerResult> + Send + 'static,
{
    type Event = E;
    type Output = R;

    fn call(
        &self,
        _ctx: InvocationContext,
        event: E,
    ) -> impl Future<Output = anyhow::Result<R>> + Send + 'static {
        (self.f)(event)
    }
}
