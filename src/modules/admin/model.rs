pub use classpulse_models::feedback::{
    AdminFeedbackList, DailyStat, DashboardData, DashboardOverview, DashboardStats,
    DashboardTrends, ExportFormat, ExportQuery, FeedbackExport, RatingSummary,
    RealWorldTopicsCount, RoundedAverages, StudentFeedback, TopicCount,
};
