#[derive(Debug, Clone)]
pub enum Message {
    // === SESSION MESSAGES ===
    SessionStarted(i64),
    SessionAlreadyActive(i64),
    NoActiveSession,
    SessionFinished(i64, i64), // session id, total minutes
    SessionCancelled(i64),
    SessionSaveFailed(String),
    TimerStateParseFailed,

    // === EXERCISE MESSAGES ===
    ExerciseSelected(String),
    ExerciseAlreadySelected(String),
    ExerciseNotInWorkout(String),
    ExerciseCompleted(String),
    ExerciseMarkedIncomplete(String),
    NoExerciseSelected,
    OrphanTimerAdopted(String),
    ConfirmSwitchExercise(String, String), // current, next
    ConfirmReopenCompleted(String),
    ConfirmCompleteExercise(usize, usize), // done, target

    // === SET MESSAGES ===
    SetStarted(i64),
    SetAlreadyActive,
    NoSetActive,
    SetLogged(i64, i64),     // set number, reps
    TargetSetsReached(usize, usize), // done, target
    RestStarted,
    PromptReps,
    PromptWeight,
    InvalidSetInput(String),

    // === PLAN MESSAGES ===
    PlanCreated(i64, String),
    PlanDayAdded(i64, String),
    PlanExerciseAdded(String),
    PlanActivated(i64),
    PlanNotFound(i64),
    PlanDayNotFound(i64),
    NoPlansFound,

    // === STREAK MESSAGES ===
    StreakNew,
    StreakActive(u32),
    StreakWarningLow(u32),
    StreakWarningHigh(u32),
    StreakBroken,

    // === HISTORY MESSAGES ===
    HistoryEmpty,
    HistoryExported(String), // file path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDebouncePrompt,
    ConfigPollIntervalPrompt,

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === GENERIC MESSAGES ===
    OperationCancelled,
    StatusHeader,
    WorkoutHeader(String), // day name
}
