use futures::future::try_join_all;

use crate::env::errors::EnvError;
use crate::env::traits::Env;

/// Drives a batch of environments through lockstep reset/step calls.
///
/// Calls fan out concurrently, which matters when each environment blocks on
/// its own socket. Any member's failure fails the whole batch call.
pub struct VecEnv<E> {
    envs: Vec<E>,
}

impl<E: Env> VecEnv<E> {
    pub fn new<F>(make_env: F, num_envs: usize) -> Self
    where
        F: Fn() -> E,
    {
        Self {
            envs: (0..num_envs).map(|_| make_env()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    pub async fn reset(&mut self) -> Result<Vec<(E::Obs, E::Info)>, EnvError> {
        try_join_all(self.envs.iter_mut().map(|env| env.reset())).await
    }

    pub async fn step(
        &mut self,
        actions: Vec<E::Act>,
    ) -> Result<Vec<(E::Obs, f32, bool, bool, E::Info)>, EnvError> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::BatchSize {
                got: actions.len(),
                expected: self.envs.len(),
            });
        }
        try_join_all(
            self.envs
                .iter_mut()
                .zip(actions)
                .map(|(env, action)| env.step(action)),
        )
        .await
    }

    pub async fn close(&mut self) -> Result<(), EnvError> {
        for env in &mut self.envs {
            env.close().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    // Counts steps; terminates at 3.
    struct CountingEnv {
        step_count: u64,
    }

    #[async_trait]
    impl Env for CountingEnv {
        type Obs = f32;
        type Act = i64;
        type Info = ();

        async fn reset(&mut self) -> Result<(f32, ()), EnvError> {
            self.step_count = 0;
            Ok((0.0, ()))
        }

        async fn step(&mut self, _act: i64) -> Result<(f32, f32, bool, bool, ()), EnvError> {
            self.step_count += 1;
            let done = self.step_count >= 3;
            Ok((self.step_count as f32, 1.0, done, false, ()))
        }

        async fn close(&mut self) -> Result<(), EnvError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn resets_and_steps_all_members() {
        let mut vec_env = VecEnv::new(|| CountingEnv { step_count: 0 }, 4);
        assert_eq!(vec_env.len(), 4);

        let initial = vec_env.reset().await.unwrap();
        assert_eq!(initial.len(), 4);

        for expected_done in [false, false, true] {
            let results = vec_env.step(vec![6; 4]).await.unwrap();
            assert_eq!(results.len(), 4);
            for (_, reward, done, truncated, _) in results {
                assert_eq!(reward, 1.0);
                assert_eq!(done, expected_done);
                assert!(!truncated);
            }
        }
    }

    #[tokio::test]
    async fn action_count_mismatch_is_an_error() {
        let mut vec_env = VecEnv::new(|| CountingEnv { step_count: 0 }, 2);
        vec_env.reset().await.unwrap();
        match vec_env.step(vec![1]).await {
            Err(EnvError::BatchSize { got: 1, expected: 2 }) => {}
            other => panic!("expected batch size error, got {other:?}"),
        }
    }
}
