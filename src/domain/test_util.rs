use anyhow::anyhow;

/// Link state of an in-memory driven-port fake. Fakes check it before touching
/// their data so a test can simulate the document store dropping out.
pub enum Connectivity {
    Up,
    Down,
}

impl Connectivity {
    /// Produces the store error a real adapter would surface when the link is down
    pub fn error_if_down(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Up => Ok(()),
            Self::Down => Err(anyhow!("lost connection to the document store!")),
        }
    }
}

/// RecordedCall stands in for one async trait function: it captures the
/// arguments of every invocation and plays back a canned response. Hand-rolled
/// because the popular mocking crates still handle async functions on traits
/// poorly.
///
/// * [Args] is the argument tuple captured per invocation
/// * [Ret] is the function's return type
///
/// A mock service holds one RecordedCall per mocked function, wraps itself in a
/// [Mutex][std::sync::Mutex] so the trait impl can mutate through `&self`, and
/// calls [record][RecordedCall::record] followed by one of the playback
/// functions inside the trait implementation.
pub struct RecordedCall<Args, Ret> {
    received_args: Vec<Args>,
    response: Option<Ret>,
}

impl<Args, Ret> RecordedCall<Args, Ret> {
    pub fn new() -> RecordedCall<Args, Ret> {
        RecordedCall {
            received_args: Vec::new(),
            response: None,
        }
    }

    /// Captures the arguments of a single invocation
    pub fn record(&mut self, arguments: Args) {
        self.received_args.push(arguments)
    }

    /// The arguments of every invocation so far, in call order
    pub fn calls(&self) -> &[Args] {
        self.received_args.as_slice()
    }
}

impl<Args, Success, Fail> RecordedCall<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Configures the result played back on invocation. [Result] itself is not
    /// [Clone], so playback clones the contained value instead.
    pub fn set_response(&mut self, response: Result<Success, Fail>) {
        self.response = Some(response);
    }

    pub fn playback(&self) -> Result<Success, Fail> {
        match self.response {
            Some(Ok(ref success)) => Ok(success.clone()),
            Some(Err(ref failure)) => Err(failure.clone()),
            None => panic!("A mocked function was invoked before its response was configured!"),
        }
    }
}

impl<Args, Success> RecordedCall<Args, anyhow::Result<Success>>
where
    Success: Clone,
{
    /// Configures an [anyhow::Result] to play back. [anyhow::Error] is not
    /// [Clone], so the stored error is reproduced through its message.
    pub fn set_response_anyhow(&mut self, response: anyhow::Result<Success>) {
        match response {
            Ok(success) => self.response = Some(Ok(success)),
            Err(failure) => self.response = Some(Err(anyhow!(format!("{}", failure)))),
        }
    }

    pub fn playback_anyhow(&self) -> anyhow::Result<Success> {
        match self.response {
            Some(Ok(ref success)) => Ok(success.clone()),
            Some(Err(ref failure)) => Err(anyhow!(format!("{}", failure))),
            None => panic!("A mocked function was invoked before its response was configured!"),
        }
    }
}
