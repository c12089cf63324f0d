use std::sync::{Arc, Mutex};

use atlas::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
}

fn analytics() -> Analytics {
    Analytics::new(AnalyticsConfig::default(), Arc::new(FixedClock(now())))
}

fn draft(title: &str, description: &str, lat: f64, lng: f64, days_ago: i64) -> MemoryDraft {
    MemoryDraft {
        title: title.to_string(),
        description: description.to_string(),
        latitude: lat,
        longitude: lng,
        date: (now().date_naive() - Duration::days(days_ago))
            .format("%Y-%m-%d")
            .to_string(),
        ..Default::default()
    }
}

#[derive(Default)]
struct InMemoryRepository {
    records: Mutex<Vec<MemoryRecord>>,
}

impl MemoryRepository for InMemoryRepository {
    fn list(&self) -> Result<Vec<MemoryRecord>, DomainError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<MemoryRecord>, DomainError> {
        Ok(self.records.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    fn upsert(&self, record: MemoryRecord) -> Result<MemoryRecord, DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(record)
    }

    fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    fn clear(&self) -> Result<usize, DomainError> {
        let mut records = self.records.lock().unwrap();
        let removed = records.len();
        records.clear();
        Ok(removed)
    }
}

#[test]
fn test_ten_happy_days() {
    let analytics = analytics();
    let records: Vec<MemoryRecord> = (0..10)
        .map(|d| {
            MemoryRecord::create(
                draft("Amazing happy trip", "Out and about", 45.0, -100.0, d),
                analytics.classifier(),
                now(),
            )
            .unwrap()
        })
        .collect();

    let stats = analytics.aggregate(&records);
    assert_eq!(stats.total_memories, 10);
    assert_eq!(stats.mood_breakdown.happy, 10);
    assert_eq!(stats.streak_days, 10);
    assert_eq!(stats.regions_visited, 1);

    let ids: Vec<String> = analytics
        .evaluate(&stats, &records)
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(ids, vec!["first-memory", "memory-collector"]);
}

#[test]
fn test_single_nostalgic_memory_in_europe() {
    let analytics = analytics();
    let record = MemoryRecord::create(
        draft("London", "I miss my childhood home", 51.5, -0.1, 0),
        analytics.classifier(),
        now(),
    )
    .unwrap();

    assert_eq!(record.mood, Some(Mood::Nostalgic));
    assert_eq!(analytics.region_of(51.5, -0.1), "Europe");

    let records = vec![record];
    let stats = analytics.aggregate(&records);
    assert_eq!(stats.regions_visited, 1);

    let badges = analytics.evaluate(&stats, &records);
    assert!(badges.iter().all(|b| b.id != "world-explorer"));
    assert!(badges.iter().any(|b| b.id == "first-memory"));
}

#[test]
fn test_empty_collection() {
    let analytics = analytics();
    let stats = analytics.aggregate(&[]);
    assert_eq!(stats.total_memories, 0);
    assert_eq!(stats.regions_visited, 0);
    assert_eq!(stats.streak_days, 0);
    assert!(stats.mood_breakdown.iter().all(|(_, count)| count == 0));
    assert!(analytics.monthly(&[]).is_empty());
    assert!(analytics.evaluate(&stats, &[]).is_empty());
}

#[test]
fn test_classification_properties() {
    let analytics = analytics();
    let texts = [
        "",
        "nothing to see",
        "happy sad",
        "remember the adventure, it was incredible and awesome",
        "HORRIBLE, TERRIBLE, AWFUL",
    ];
    for text in texts {
        let first = analytics.classify(text);
        assert_eq!(first, analytics.classify(text));
        assert!(Mood::ALL.contains(&first.mood));
        assert!((0.0..=1.0).contains(&first.score));
        assert!((0.0..=1.0).contains(&first.confidence));
    }
    assert_eq!(analytics.classify("happy sad").mood, Mood::Happy);
}

#[test]
fn test_badges_are_monotone_in_records() {
    let analytics = analytics();
    let places = [
        (45.0, -100.0),
        (56.0, -106.0),
        (51.5, -0.1),
        (0.0, 0.0),
        (35.7, 139.7),
        (-15.8, -47.9),
        (-80.0, 0.0),
    ];

    let mut records = Vec::new();
    let mut previous: Vec<String> = Vec::new();
    for (i, (lat, lng)) in places.iter().cycle().take(14).enumerate() {
        let mut d = draft("Stop", "Another place", *lat, *lng, i as i64);
        if i % 2 == 0 {
            d.ai_story = Some(format!("Chapter {}", i));
        }
        records.push(MemoryRecord::create(d, analytics.classifier(), now()).unwrap());

        let stats = analytics.aggregate(&records);
        let unlocked: Vec<String> = analytics
            .evaluate(&stats, &records)
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert!(previous.iter().all(|id| unlocked.contains(id)));
        previous = unlocked;
    }

    assert_eq!(
        previous,
        vec!["first-memory", "memory-collector", "world-explorer", "storyteller"]
    );
}

#[test]
fn test_monthly_view_limits() {
    let analytics = analytics();
    let records: Vec<MemoryRecord> = (0..20)
        .map(|m| {
            let d = draft("Month", "Entry", 0.0, 0.0, m * 31);
            MemoryRecord::create(d, analytics.classifier(), now()).unwrap()
        })
        .collect();

    let monthly = analytics.monthly(&records);
    assert_eq!(monthly.len(), 12);
    assert!(monthly
        .windows(2)
        .all(|w| (w[0].year, w[0].month) < (w[1].year, w[1].month)));
    let last = monthly.last().unwrap();
    assert_eq!((last.year, last.month), (2024, 6));
}

#[test]
fn test_memory_service_lifecycle() {
    let repo = Arc::new(InMemoryRepository::default());
    let service = MemoryService::new(repo.clone(), analytics());

    let first = service
        .create(draft("Beach", "A terrible sunburn", 38.7, -9.1, 1))
        .unwrap();
    let second = service
        .create(draft("Hike", "Thrilling adventure", 46.5, 7.9, 0))
        .unwrap();
    assert_eq!(first.mood, Some(Mood::Sad));
    assert_eq!(second.mood, Some(Mood::Excited));

    let updated = service
        .update(&first.id, draft("Beach", "A wonderful swim", 38.7, -9.1, 1))
        .unwrap();
    assert_eq!(updated.mood, Some(Mood::Happy));
    assert_eq!(updated.created_at, first.created_at);

    // replaced in place, order kept
    let ids: Vec<String> = service.list().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);

    let stats = service.stats().unwrap();
    assert_eq!(stats.total_memories, 2);
    assert_eq!(stats.mood_breakdown.happy, 1);
    assert_eq!(stats.mood_breakdown.excited, 1);
    assert_eq!(stats.streak_days, 2);

    let timeline = service.timeline().unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].memories[0].id, second.id);

    assert!(service.delete(&second.id).unwrap());
    assert!(!service.delete(&second.id).unwrap());
    assert!(matches!(
        service.get(&second.id),
        Err(DomainError::NotFound { .. })
    ));

    assert!(matches!(
        service.create(draft("", "no title", 0.0, 0.0, 0)),
        Err(DomainError::Validation(_))
    ));

    assert_eq!(service.clear().unwrap(), 1);
    assert_eq!(service.dashboard().unwrap().stats, UserStats::default());
}
