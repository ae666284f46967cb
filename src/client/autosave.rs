//! # 메모 자동 저장 (디바운스)
//!
//! 질문마다 독립된 타이머를 둡니다. 입력이 들어올 때마다 해당 질문의 타이머를
//! 다시 시작하고, 타이머가 끝나면 마지막 값만 한 번 저장합니다.
//! 따라서 계속 입력하는 동안 질문당 네트워크 호출은 1000ms에 최대 한 번입니다.
//!
//! 같은 질문의 저장은 질문별 잠금(gate)으로 한 번에 하나씩만 진행합니다.
//! 값은 잠금을 얻은 뒤에 꺼내므로, 느린 저장이 끝난 뒤에 나가는 저장이 항상 더 새 값입니다.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::{sync::Mutex as AsyncMutex, task::JoinHandle};

use super::api::{ClientError, NoteSink};

/// 마지막 입력 후 저장까지 기다리는 시간
pub const NOTE_DEBOUNCE: Duration = Duration::from_millis(1000);

struct Pending {
    generation: u64,
    value: String,
    handle: JoinHandle<()>,
}

type Gate = Arc<AsyncMutex<()>>;

#[derive(Default)]
struct Inner {
    next_generation: u64,
    pending: HashMap<String, Pending>,
    gates: HashMap<String, Gate>,
}

impl Inner {
    fn gate(&mut self, question_id: &str) -> Gate {
        self.gates.entry(question_id.to_string()).or_default().clone()
    }
}

type Shared = Arc<Mutex<Inner>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Inner> {
    // 잠금 안에서 패닉하는 코드가 없으므로 poison 상태여도 데이터는 유효합니다.
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct NoteAutosaver {
    sink: Arc<dyn NoteSink>,
    delay: Duration,
    shared: Shared,
}

impl NoteAutosaver {
    pub fn new(sink: Arc<dyn NoteSink>) -> Self {
        Self::with_delay(sink, NOTE_DEBOUNCE)
    }

    pub fn with_delay(sink: Arc<dyn NoteSink>, delay: Duration) -> Self {
        Self {
            sink,
            delay,
            shared: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// 메모 입력 한 번. 해당 질문의 타이머를 다시 시작합니다.
    ///
    /// tokio 런타임 안에서 호출해야 합니다.
    pub fn note_changed(&self, question_id: &str, value: impl Into<String>) {
        let mut inner = lock(&self.shared);
        inner.next_generation += 1;
        let generation = inner.next_generation;

        if let Some(previous) = inner.pending.remove(question_id) {
            previous.handle.abort();
        }

        let handle = tokio::spawn(fire_after(
            self.shared.clone(),
            inner.gate(question_id),
            self.sink.clone(),
            question_id.to_string(),
            generation,
            self.delay,
        ));

        inner.pending.insert(
            question_id.to_string(),
            Pending {
                generation,
                value: value.into(),
                handle,
            },
        );
    }

    /// 아직 저장되지 않은 메모가 있는 질문 수
    pub fn pending_count(&self) -> usize {
        lock(&self.shared).pending.len()
    }

    /// 기다리는 메모를 모두 즉시 저장합니다 (화면을 떠날 때).
    ///
    /// 하나가 실패해도 나머지는 계속 저장하고, 첫 번째 에러를 돌려줍니다.
    /// 이미 진행 중인 저장이 있으면 그 저장이 끝난 뒤에 보냅니다.
    pub async fn flush(&self) -> Result<(), ClientError> {
        let drained: Vec<(String, String, Gate)> = {
            let mut inner = lock(&self.shared);
            let values: Vec<(String, String)> = inner
                .pending
                .drain()
                .map(|(id, pending)| {
                    pending.handle.abort();
                    (id, pending.value)
                })
                .collect();
            values
                .into_iter()
                .map(|(id, value)| {
                    let gate = inner.gate(&id);
                    (id, value, gate)
                })
                .collect()
        };

        let mut first_error = None;
        for (question_id, value, gate) in drained {
            let _in_order = gate.lock().await;
            if let Err(e) = self.sink.save_note(&question_id, &value).await {
                tracing::warn!(question_id = %question_id, "Failed to flush note: {}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for NoteAutosaver {
    fn drop(&mut self) {
        for (_, pending) in lock(&self.shared).pending.drain() {
            pending.handle.abort();
        }
    }
}

async fn fire_after(
    shared: Shared,
    gate: Gate,
    sink: Arc<dyn NoteSink>,
    question_id: String,
    generation: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;

    // 앞선 저장이 끝날 때까지 값은 pending에 남아 있고, 새 입력이 오면 이 태스크는 취소됩니다.
    let _in_order = gate.lock().await;

    let value = {
        let mut inner = lock(&shared);
        // 그 사이 새 입력이 들어왔으면 이 타이머는 무효입니다.
        let current = inner
            .pending
            .get(&question_id)
            .is_some_and(|p| p.generation == generation);
        if current {
            inner.pending.remove(&question_id).map(|p| p.value)
        } else {
            None
        }
    };

    let Some(value) = value else {
        return;
    };

    if let Err(e) = sink.save_note(&question_id, &value).await {
        tracing::warn!(question_id = %question_id, "Failed to save note: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NoteSink for RecordingSink {
        async fn save_note(&self, question_id: &str, note: &str) -> Result<(), ClientError> {
            self.calls
                .lock()
                .unwrap()
                .push((question_id.to_string(), note.to_string()));
            Ok(())
        }
    }

    fn setup() -> (Arc<RecordingSink>, NoteAutosaver) {
        let sink = Arc::new(RecordingSink::default());
        let saver = NoteAutosaver::new(sink.clone());
        (sink, saver)
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_send_last_value_once() {
        let (sink, saver) = setup();

        for value in ["h", "he", "hel", "hell", "hello"] {
            saver.note_changed("q1", value);
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        assert!(sink.calls().is_empty());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(sink.calls(), vec![("q1".to_string(), "hello".to_string())]);
        assert_eq!(saver.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_resets_on_each_keystroke() {
        let (sink, saver) = setup();

        saver.note_changed("q1", "a");
        tokio::time::sleep(Duration::from_millis(900)).await;
        saver.note_changed("q1", "ab");
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(sink.calls().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(sink.calls(), vec![("q1".to_string(), "ab".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn questions_debounce_independently() {
        let (sink, saver) = setup();

        saver.note_changed("q1", "first");
        tokio::time::sleep(Duration::from_millis(500)).await;
        saver.note_changed("q2", "second");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(sink.calls(), vec![("q1".to_string(), "first".to_string())]);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(sink.calls().len(), 2);
        assert_eq!(sink.calls()[1], ("q2".to_string(), "second".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn flush_sends_pending_immediately() {
        let (sink, saver) = setup();

        saver.note_changed("q1", "draft");
        saver.flush().await.unwrap();
        assert_eq!(sink.calls(), vec![("q1".to_string(), "draft".to_string())]);

        // 타이머가 취소되었으므로 다시 보내지 않습니다.
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(sink.calls().len(), 1);
    }

    /// 호출마다 정해 둔 시간만큼 걸려서 저장하는 싱크. 마지막으로 끝난 저장 값이 남습니다.
    #[derive(Default)]
    struct SlowSink {
        delays: Mutex<std::collections::VecDeque<Duration>>,
        stored: Mutex<HashMap<String, String>>,
        started: Mutex<Vec<String>>,
    }

    impl SlowSink {
        fn with_delays(delays: &[u64]) -> Arc<Self> {
            let sink = Self::default();
            sink.delays
                .lock()
                .unwrap()
                .extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
            Arc::new(sink)
        }

        fn stored(&self, question_id: &str) -> Option<String> {
            self.stored.lock().unwrap().get(question_id).cloned()
        }
    }

    #[async_trait]
    impl NoteSink for SlowSink {
        async fn save_note(&self, question_id: &str, note: &str) -> Result<(), ClientError> {
            self.started.lock().unwrap().push(note.to_string());
            let delay = self.delays.lock().unwrap().pop_front().unwrap_or_default();
            tokio::time::sleep(delay).await;
            self.stored
                .lock()
                .unwrap()
                .insert(question_id.to_string(), note.to_string());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn newer_note_wins_over_slow_earlier_save() {
        let sink = SlowSink::with_delays(&[3000, 100]);
        let saver = NoteAutosaver::new(sink.clone());

        saver.note_changed("q1", "old");
        // 첫 저장이 시작되어 3초 동안 진행 중
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(*sink.started.lock().unwrap(), vec!["old".to_string()]);

        saver.note_changed("q1", "new");
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(sink.stored("q1").as_deref(), Some("new"));
        assert_eq!(
            *sink.started.lock().unwrap(),
            vec!["old".to_string(), "new".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn flush_waits_for_save_in_flight() {
        let sink = SlowSink::with_delays(&[3000, 100]);
        let saver = NoteAutosaver::new(sink.clone());

        saver.note_changed("q1", "old");
        tokio::time::sleep(Duration::from_millis(1100)).await;

        saver.note_changed("q1", "new");
        saver.flush().await.unwrap();

        assert_eq!(sink.stored("q1").as_deref(), Some("new"));
        assert_eq!(saver.pending_count(), 0);
    }
}
