//! Background execution and error conversion shared by every use-case.
//!
//! A one-shot use-case runs its unit of work on the background runtime and
//! converts a returned [`Fault`] through the configured [`ErrorConverter`].
//! A flow use-case does the same for every subscription to its stream, ending
//! the stream after the first converted failure.

use std::any::type_name;
use std::future::Future;
use std::panic;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::runtime::Handle;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, instrument, warn};

use crate::domain::errors::AppError;
use crate::domain::ports::error_mapper::ErrorConverter;
use crate::domain::ports::repositories::FaultStream;
use crate::shared::errors::Fault;
use crate::utils::{create_stream, AbortOnDrop};

/// Stream handed to callers of [`BaseFlowUseCase::observe`].
pub type AppStream<T> = BoxStream<'static, Result<T, AppError>>;

const FLOW_BUFFER: usize = 64;

/// Background runtime plus the converter every use-case shares.
#[derive(Clone)]
pub struct UseCaseRuntime {
    handle: Handle,
    converter: Arc<dyn ErrorConverter>,
}

impl UseCaseRuntime {
    pub fn new(handle: Handle, converter: Arc<dyn ErrorConverter>) -> Self {
        Self { handle, converter }
    }

    /// Uses the runtime the caller is currently running on.
    pub fn current(converter: Arc<dyn ErrorConverter>) -> Self {
        Self::new(Handle::current(), converter)
    }

    pub fn converter(&self) -> &Arc<dyn ErrorConverter> {
        &self.converter
    }

    /// Runs `work` on the background runtime and converts its fault, if any.
    ///
    /// Dropping the returned future aborts the background task.
    #[instrument(name = "use_case", skip_all, fields(use_case = name))]
    pub async fn run<T, Fut>(&self, name: &'static str, work: Fut) -> Result<T, AppError>
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, Fault>> + Send + 'static,
    {
        debug!("Running on background context.");
        let mut task = AbortOnDrop(self.handle.spawn(work));

        let outcome = match (&mut task.0).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
            Err(_) => Err(Fault::Cancelled),
        };

        outcome.map_err(|fault| {
            let converted = self.converter.convert(fault);
            warn!(error = %converted, "Use-case failed.");
            converted
        })
    }

    /// Wraps `flow` into a lazy subscription driven on the background runtime.
    pub fn observe<T>(&self, name: &'static str, flow: FaultStream<T>) -> AppStream<T>
    where
        T: Send + 'static,
    {
        let runtime = self.clone();
        stream::once(async move { runtime.subscribe(name, flow) }).flatten().boxed()
    }

    fn subscribe<T>(&self, name: &'static str, mut flow: FaultStream<T>) -> Subscription<T>
    where
        T: Send + 'static,
    {
        debug!(use_case = name, "Starting subscription.");
        let converter = Arc::clone(&self.converter);
        let (items, task) = create_stream(&self.handle, FLOW_BUFFER, move |tx| async move {
            while let Some(item) = flow.next().await {
                let item = item.map_err(|fault| converter.convert(fault));
                let terminal = item.is_err();
                if let Err(err) = &item {
                    warn!(use_case = name, error = %err, "Flow failed, closing subscription.");
                }
                if tx.send(item).await.is_err() {
                    debug!(use_case = name, "Subscriber went away.");
                    return;
                }
                if terminal {
                    return;
                }
            }
            debug!(use_case = name, "Flow completed.");
        });
        Subscription { items, _task: AbortOnDrop(task) }
    }
}

/// One observer's view of a flow. Dropping it stops the forwarding task.
struct Subscription<T> {
    items: ReceiverStream<Result<T, AppError>>,
    _task: AbortOnDrop<()>,
}

impl<T> Stream for Subscription<T> {
    type Item = Result<T, AppError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.items.poll_next_unpin(cx)
    }
}

/// One-shot operation executed off the caller's context.
#[async_trait]
pub trait BaseUseCase: Clone + Send + Sync + 'static {
    type Params: Send + 'static;
    type Output: Send + 'static;

    fn runtime(&self) -> &UseCaseRuntime;

    async fn execute_on_background(&self, params: Self::Params) -> Result<Self::Output, Fault>;

    async fn execute(&self, params: Self::Params) -> Result<Self::Output, AppError> {
        let this = self.clone();
        self.runtime()
            .run(type_name::<Self>(), async move { this.execute_on_background(params).await })
            .await
    }
}

/// Continuous operation producing a stream of results.
pub trait BaseFlowUseCase: Send + Sync + 'static {
    type Params;
    type Output: Send + 'static;

    fn runtime(&self) -> &UseCaseRuntime;

    fn create_flow(&self, params: Self::Params) -> FaultStream<Self::Output>;

    fn observe(&self, params: Self::Params) -> AppStream<Self::Output> {
        self.runtime().observe(type_name::<Self>(), self.create_flow(params))
    }
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::oneshot;

    use super::*;
    use crate::domain::errors::{DomainError, ServerError};
    use crate::domain::ports::error_mapper::ErrorMapper;
    use crate::domain::services::error_converter::ErrorConverterImpl;

    /// Claims only 418 responses.
    struct TeapotMapper;

    impl ErrorMapper for TeapotMapper {
        fn map_error(&self, fault: Fault) -> ControlFlow<DomainError, Fault> {
            match fault {
                Fault::Response { status: 418 } => ControlFlow::Break(
                    ServerError::Unexpected { code: Some("teapot".into()), message: None }.into(),
                ),
                other => ControlFlow::Continue(other),
            }
        }
    }

    fn runtime() -> UseCaseRuntime {
        UseCaseRuntime::current(Arc::new(ErrorConverterImpl::new([
            Arc::new(TeapotMapper) as Arc<dyn ErrorMapper>
        ])))
    }

    #[derive(Clone)]
    struct Doubler {
        runtime: UseCaseRuntime,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BaseUseCase for Doubler {
        type Params = i64;
        type Output = i64;

        fn runtime(&self) -> &UseCaseRuntime {
            &self.runtime
        }

        async fn execute_on_background(&self, params: i64) -> Result<i64, Fault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match params {
                418 => Err(Fault::Response { status: 418 }),
                n if n < 0 => Err(Fault::Fatal("negative input".into())),
                n => Ok(n * 2),
            }
        }
    }

    #[tokio::test]
    async fn completed_work_is_returned_unchanged() {
        let use_case = Doubler { runtime: runtime(), calls: Arc::default() };
        assert_eq!(use_case.execute(21).await.ok(), Some(42));
        assert_eq!(use_case.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn claimed_fault_is_returned_converted() {
        let use_case = Doubler { runtime: runtime(), calls: Arc::default() };
        let err = use_case.execute(418).await.err();
        assert_eq!(
            err.as_ref().and_then(AppError::as_server),
            Some(&ServerError::Unexpected { code: Some("teapot".into()), message: None })
        );
    }

    #[tokio::test]
    async fn unclaimed_fault_passes_through() {
        let use_case = Doubler { runtime: runtime(), calls: Arc::default() };
        let err = use_case.execute(-1).await.err();
        assert!(matches!(err, Some(AppError::Unconverted(Fault::Fatal(_)))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn work_runs_on_the_background_handle() {
        let background = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("teller-io")
            .enable_all()
            .build()
            .expect("background runtime");
        let runtime = UseCaseRuntime::new(
            background.handle().clone(),
            Arc::new(ErrorConverterImpl::new(Vec::new())),
        );

        let thread = runtime
            .run("thread_probe", async {
                Ok(std::thread::current().name().map(str::to_owned))
            })
            .await;
        assert_eq!(thread.ok().flatten().as_deref(), Some("teller-io"));
        background.shutdown_background();
    }

    #[tokio::test]
    async fn dropping_the_caller_aborts_background_work() {
        let runtime = runtime();
        let (done_tx, done_rx) = oneshot::channel::<()>();

        let call = runtime.run("never_finishes", async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            let _ = done_tx.send(());
            Ok::<_, Fault>(())
        });
        let timed_out = tokio::time::timeout(Duration::from_millis(20), call).await;
        assert!(timed_out.is_err());

        // The sender is dropped with the aborted task, closing the channel.
        assert!(done_rx.await.is_err());
    }

    struct Numbers {
        runtime: UseCaseRuntime,
    }

    impl BaseFlowUseCase for Numbers {
        type Params = Vec<Result<i64, u16>>;
        type Output = i64;

        fn runtime(&self) -> &UseCaseRuntime {
            &self.runtime
        }

        fn create_flow(&self, params: Self::Params) -> FaultStream<i64> {
            stream::iter(params.into_iter().map(|item| item.map_err(|status| Fault::Response { status })))
                .boxed()
        }
    }

    #[tokio::test]
    async fn flow_forwards_items_in_order() {
        let use_case = Numbers { runtime: runtime() };
        let items: Vec<i64> = use_case
            .observe(vec![Ok(1), Ok(2), Ok(3)])
            .map(|item| item.unwrap_or(-1))
            .collect()
            .await;
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn flow_ends_after_first_converted_failure() {
        let use_case = Numbers { runtime: runtime() };
        let items: Vec<Result<i64, AppError>> =
            use_case.observe(vec![Ok(1), Err(418), Ok(3), Err(500)]).collect().await;

        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Ok(1)));
        assert_eq!(items[1].as_ref().err().and_then(AppError::as_server).and_then(ServerError::code), Some("teapot"));
    }

    #[tokio::test]
    async fn each_observer_gets_its_own_subscription() {
        let use_case = Numbers { runtime: runtime() };
        let first = use_case.observe(vec![Ok(1), Ok(2)]);
        let second = use_case.observe(vec![Ok(10)]);

        let second: Vec<i64> = second.filter_map(|item| async move { item.ok() }).collect().await;
        let first: Vec<i64> = first.filter_map(|item| async move { item.ok() }).collect().await;
        assert_eq!(first, vec![1, 2]);
        assert_eq!(second, vec![10]);
    }

    #[tokio::test]
    async fn flow_is_lazy_until_polled() {
        let polled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polled);
        let flow: FaultStream<i64> = stream::once(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        })
        .boxed();

        let mut observed = runtime().observe("lazy", flow);
        tokio::task::yield_now().await;
        assert_eq!(polled.load(Ordering::SeqCst), 0);

        assert!(matches!(observed.next().await, Some(Ok(7))));
        assert_eq!(polled.load(Ordering::SeqCst), 1);
    }
}
