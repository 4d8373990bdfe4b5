use super::{BatchHistogramAggregator, Bucket, Histogram, HistogramAggregator};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};

impl Serialize for Bucket {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        match self {
            Bucket::Leaf(frequency) => serializer.serialize_u64(*frequency),
            Bucket::Nested(histogram) => histogram.serialize(serializer),
        }
    }
}

impl Serialize for Histogram {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        let mut map = serializer.serialize_map(Some(self.buckets().len()))?;
        for (i, bucket) in self.buckets().iter().enumerate() {
            map.serialize_entry(&self.ticks().label(i), bucket)?;
        }
        map.end()
    }
}

struct AggregatorBody<'a>(&'a HistogramAggregator);

impl Serialize for AggregatorBody<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        let mut description = Map::new();
        self.0.updater().describe(&mut description, self.0.actions());
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("histogram_updater", &Value::Object(description))?;
        map.serialize_entry("histogram", self.0.histogram())?;
        map.end()
    }
}

impl Serialize for HistogramAggregator {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("histogram_aggregator", &AggregatorBody(self))?;
        map.end()
    }
}

struct AggregatorList<'a>(&'a BatchHistogramAggregator);

impl Serialize for AggregatorList<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for aggregator in self.0.iter() {
            seq.serialize_element(aggregator)?;
        }
        seq.end()
    }
}

impl Serialize for BatchHistogramAggregator {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        let mut body = serializer.serialize_map(Some(1))?;
        body.serialize_entry("batch_histogram_aggregator", &BatchBody(self))?;
        body.end()
    }
}

struct BatchBody<'a>(&'a BatchHistogramAggregator);

impl Serialize for BatchBody<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where S: Serializer {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("histogram_aggregators", &AggregatorList(self.0))?;
        map.end()
    }
}
